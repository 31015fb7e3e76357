use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which source document a load failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Builds,
    RelicSets,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Builds => f.write_str("character build"),
            Document::RelicSets => f.write_str("relic-set metadata"),
        }
    }
}

/// The only fatal error family: a source document could not be read or is
/// not a JSON array of records. No partial corpus is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {document} document {}: {source}", .path.display())]
    Io {
        document: Document,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{document} document is not valid JSON: {source}")]
    Json {
        document: Document,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}", join_messages(.0))]
    Multiple(Vec<LoadError>),
}

impl LoadError {
    /// Collapse per-document failures into one error, if any.
    pub fn aggregate(mut errors: Vec<LoadError>) -> Option<LoadError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(LoadError::Multiple(errors)),
        }
    }

    /// Documents that failed, in report order.
    pub fn documents(&self) -> Vec<Document> {
        match self {
            LoadError::Io { document, .. } | LoadError::Json { document, .. } => vec![*document],
            LoadError::Multiple(errors) => errors.iter().flat_map(|e| e.documents()).collect(),
        }
    }
}

fn join_messages(errors: &[LoadError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error(document: Document) -> LoadError {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        LoadError::Json { document, source }
    }

    #[test]
    fn aggregate_single_passes_through() {
        let err = LoadError::aggregate(vec![json_error(Document::Builds)]).unwrap();
        assert!(matches!(err, LoadError::Json { .. }));
        assert!(err.to_string().starts_with("character build document is not valid JSON"));
    }

    #[test]
    fn aggregate_names_every_document() {
        let err = LoadError::aggregate(vec![
            json_error(Document::Builds),
            json_error(Document::RelicSets),
        ])
        .unwrap();
        assert_eq!(err.documents(), vec![Document::Builds, Document::RelicSets]);
        let message = err.to_string();
        assert!(message.contains("character build"));
        assert!(message.contains("relic-set metadata"));
    }

    #[test]
    fn aggregate_empty_is_none() {
        assert!(LoadError::aggregate(Vec::new()).is_none());
    }
}
