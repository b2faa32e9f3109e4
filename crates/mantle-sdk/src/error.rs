//! Error types for method handler calls

/// Result type for handler calls
pub type CallResult = Result<crate::Value, CallError>;

/// Errors raised at the handler-call boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum CallError {
    /// Type mismatch while casting an argument or the target
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Invalid argument (wrong arity, null where a value is required, ...)
    #[error("argument error: {0}")]
    ArgumentError(String),

    /// The target method is not accessible to the caller
    #[error("method '{0}' is not accessible")]
    Inaccessible(String),

    /// The target method itself failed
    #[error("target raised: {0}")]
    Raised(String),
}

impl CallError {
    /// True when this error signals a cast/visibility problem at the call
    /// boundary rather than a failure of the target method itself.
    pub fn is_binding_failure(&self) -> bool {
        matches!(
            self,
            CallError::TypeMismatch { .. } | CallError::Inaccessible(_)
        )
    }
}

impl From<String> for CallError {
    fn from(s: String) -> Self {
        CallError::Raised(s)
    }
}

impl From<&str> for CallError {
    fn from(s: &str) -> Self {
        CallError::Raised(s.to_string())
    }
}
