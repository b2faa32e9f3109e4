//! Introspector configuration
//!
//! All configuration is explicit and passed at construction time; nothing is
//! read from ambient process-wide state.

use std::fmt;
use std::sync::Arc;

use crate::invoke::InvokeStrategy;

/// Configuration for an [`Introspector`](crate::Introspector)
#[derive(Default, Clone)]
pub struct IntrospectorConfig {
    /// Enable the relaxed management-interface matching retries: after an
    /// exact-name miss, retry with module qualifiers stripped, then with
    /// enclosing-type qualifiers stripped, in that order.
    pub relaxed_interface_matching: bool,

    /// Caller-supplied invoker used unconditionally instead of the built-in
    /// specialized/generic strategies.
    pub custom_invoker: Option<Arc<dyn InvokeStrategy>>,
}

impl IntrospectorConfig {
    /// Default configuration: strict matching, built-in invokers
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable relaxed management-interface matching
    pub fn relaxed_interface_matching(mut self, enabled: bool) -> Self {
        self.relaxed_interface_matching = enabled;
        self
    }

    /// Install a custom invoker that overrides both built-in strategies
    pub fn custom_invoker(mut self, invoker: Arc<dyn InvokeStrategy>) -> Self {
        self.custom_invoker = Some(invoker);
        self
    }
}

impl fmt::Debug for IntrospectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntrospectorConfig")
            .field("relaxed_interface_matching", &self.relaxed_interface_matching)
            .field("custom_invoker", &self.custom_invoker.is_some())
            .finish()
    }
}
