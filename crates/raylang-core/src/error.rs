/// Core error types for Raylang.

/// A specialized Result type for Raylang operations.
pub type RaylangResult<T> = Result<T, RaylangError>;

/// Top-level error type shared by the IR, codec, renderer boundary and CLI.
#[derive(Debug, thiserror::Error)]
pub enum RaylangError {
    #[error("validation error at {path}: {message}")]
    Validation { path: String, message: String },

    #[error("scene failed validation with {} error(s): {}", .0.len(), summarize(.0))]
    InvalidScene(Vec<RaylangError>),

    #[error("decode error at {path}: {message}")]
    Decode { path: String, message: String },

    #[error("encode error: {0}")]
    Encode(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RaylangError {
    /// Create a validation error for the field at `path`.
    pub fn validation(path: impl ToString, message: impl Into<String>) -> Self {
        RaylangError::Validation {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Create a decode error for the document location at `path`.
    pub fn decode(path: impl ToString, message: impl Into<String>) -> Self {
        RaylangError::Decode {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Collapse a list of validation failures into one error.
    /// A single failure is returned as-is.
    pub fn from_validation(mut errors: Vec<RaylangError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            RaylangError::InvalidScene(errors)
        }
    }

    /// Whether this error was raised while validating a scene (as opposed to
    /// decoding, IO or rendering).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RaylangError::Validation { .. } | RaylangError::InvalidScene(_)
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, RaylangError::Decode { .. })
    }

    /// The IR/document path this error points at, if it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            RaylangError::Validation { path, .. } | RaylangError::Decode { path, .. } => {
                Some(path.as_str())
            }
            _ => None,
        }
    }
}

fn summarize(errors: &[RaylangError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = RaylangError::validation("width", "must be a positive integer, got 0");
        assert_eq!(
            err.to_string(),
            "validation error at width: must be a positive integer, got 0"
        );
        assert!(err.is_validation());
        assert_eq!(err.path(), Some("width"));
    }

    #[test]
    fn test_decode_error_display() {
        let err = RaylangError::decode("objects.Group[1]", "unknown variant `Cube`");
        assert!(err.to_string().starts_with("decode error at objects.Group[1]"));
        assert!(err.is_decode());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_validation_single_stays_single() {
        let err = RaylangError::from_validation(vec![RaylangError::validation("threads", "bad")]);
        assert!(matches!(err, RaylangError::Validation { .. }));
    }

    #[test]
    fn test_from_validation_many_aggregates() {
        let err = RaylangError::from_validation(vec![
            RaylangError::validation("threads", "bad"),
            RaylangError::validation("width", "bad"),
        ]);
        assert!(err.is_validation());
        let msg = err.to_string();
        assert!(msg.contains("2 error(s)"));
        assert!(msg.contains("threads"));
        assert!(msg.contains("width"));
    }
}
