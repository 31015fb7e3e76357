pub mod catalogs;
pub mod corpus;
pub mod error;
pub mod ffi;
pub mod normalizer;
pub mod query;
pub mod registry;
pub mod slug;
pub mod substats;
pub mod tokenizer;
pub mod types;

pub use catalogs::CORPUS_VERSION;
pub use corpus::{build_corpus, Corpus};
pub use error::{Document, LoadError};
pub use ffi::{build_corpus_to_json, resolve_set_name_to_json, search_to_json, set_users_to_json};
pub use normalizer::normalize_character;
pub use query::{
    characters_prioritizing, characters_using_set, filter_set_users, option_label, search,
    stat_usage, CharacterFilter, SearchResults, StatFilter, StatUsage,
};
pub use registry::SetRegistry;
pub use slug::{deslugify, slugify};
pub use substats::parse_substats;
pub use tokenizer::{parse_set_field, parse_set_list};
pub use types::*;
