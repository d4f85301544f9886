use super::types::CrackError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Whether an attack loop may skip the failing strategy and keep going.
    pub recoverable: bool,
    pub exit_code: i32,
}

impl CrackError {
    /// Classify this error to decide whether a strategy loop can continue past it.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Recovered locally by skipping the strategy
            CrackError::MalformedInput(_) => ErrorClassification {
                error_type: "MalformedInputError",
                recoverable: true,
                exit_code: 3,
            },
            CrackError::UnsupportedAlgorithm(_) => ErrorClassification {
                error_type: "UnsupportedAlgorithmError",
                recoverable: true,
                exit_code: 3,
            },

            // Fail fast
            CrackError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                recoverable: false,
                exit_code: 2,
            },
            CrackError::Cancelled(_) => ErrorClassification {
                error_type: "CancelledError",
                recoverable: false,
                exit_code: 130,
            },
            CrackError::Io(_) => ErrorClassification {
                error_type: "IoError",
                recoverable: false,
                exit_code: 1,
            },
            CrackError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                recoverable: true,
                exit_code: 3,
            },
            CrackError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                recoverable: false,
                exit_code: 2,
            },
            CrackError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                recoverable: false,
                exit_code: 1,
            },
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.classify().recoverable
    }
}
