//! Error types for vitrine_app

use thiserror::Error;

/// Errors that can occur in the Vitrine application shell
#[derive(Error, Debug)]
pub enum VitrineError {
    /// A section loader failed to produce its choreographer
    #[error("section '{name}' failed to load: {reason}")]
    SectionLoad { name: String, reason: String },

    /// Failed to parse the TOML config file
    #[error("config parse failed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Failed to parse the JSON scroll script
    #[error("scroll script parse failed: {0}")]
    ScriptParse(#[from] serde_json::Error),

    /// Filesystem error reading config or script files
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitrineError {
    /// Convenience constructor for section load failures
    pub fn section_load(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SectionLoad {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for vitrine_app operations
pub type Result<T> = std::result::Result<T, VitrineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_load_message_names_the_section() {
        let err = VitrineError::section_load("creative", "missing content");
        assert_eq!(
            err.to_string(),
            "section 'creative' failed to load: missing content"
        );
    }

    #[test]
    fn test_anyhow_converts_transparently() {
        let source = anyhow::anyhow!("scheduler dropped");
        let err: VitrineError = source.into();
        assert_eq!(err.to_string(), "scheduler dropped");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "vitrine.toml");
        let err: VitrineError = io.into();
        assert!(err.to_string().contains("vitrine.toml"));
    }
}
