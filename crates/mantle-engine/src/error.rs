//! Error types for invocation dispatch
//!
//! Introspection-time problems (non-public interface, accessor conflicts,
//! misbehaving self-describing beans) never surface as errors; they collapse
//! to a non-compliant outcome with detail available through logging only.
//! Only invocation failures and caller-input errors cross the boundary.

use mantle_sdk::CallError;

/// Errors returned from [`invoke`](crate::invoke::Invoker::invoke)
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvokeError {
    /// No operation with the given name and signature exists on the target
    #[error("no operation '{name}({signature})' on {class}")]
    OperationNotFound {
        /// Operation name
        name: String,
        /// Comma-joined signature type names
        signature: String,
        /// Qualified name of the target's class
        class: String,
    },

    /// Caller-supplied input is invalid (empty name, wrong argument shape)
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// The target's own method raised; carries the original cause
    #[error("operation '{name}' raised")]
    TargetError {
        /// Operation name
        name: String,
        /// The target's own failure
        #[source]
        source: CallError,
    },
}

impl InvokeError {
    pub(crate) fn not_found(name: &str, signature: &[&str], class: &str) -> Self {
        InvokeError::OperationNotFound {
            name: name.to_string(),
            signature: signature.join(", "),
            class: class.to_string(),
        }
    }
}
