//! Errors raised while loading the bundled reference tables.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Duplicate species id: {0}")]
    DuplicateSpecies(u32),

    /// A nature record breaks the one-up/one-down rule or repeats a name.
    #[error("Invalid nature '{name}': {reason}")]
    InvalidNature { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_nature_message_names_the_record() {
        let err = DataError::InvalidNature {
            name: "いじっぱり".to_string(),
            reason: "boosts hp".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("いじっぱり"));
        assert!(display.contains("boosts hp"));
    }
}
