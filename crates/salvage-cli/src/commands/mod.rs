pub mod character;
pub mod lint;
pub mod search;
pub mod set;
