//! Runtime type registry
//!
//! Process-level lookup of runtime types and description providers by
//! qualified name. This is the stand-in for a host class-loading facility:
//! description providers are resolved here by the fixed naming convention
//! `<qualified class name>MBeanDescription`.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::class::ClassDef;
use crate::provider::DescriptionProvider;

/// Suffix appended to a class name to locate its description provider
pub const DESCRIPTION_PROVIDER_SUFFIX: &str = "MBeanDescription";

/// Name-keyed registry of runtime types and description providers
#[derive(Default)]
pub struct Registry {
    classes: FxHashMap<String, Arc<ClassDef>>,
    providers: FxHashMap<String, Arc<dyn DescriptionProvider>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class under its qualified name
    pub fn register_class(&mut self, class: Arc<ClassDef>) {
        self.classes.insert(class.name().to_string(), class);
    }

    /// Look up a class by qualified name
    pub fn class(&self, name: &str) -> Option<&Arc<ClassDef>> {
        self.classes.get(name)
    }

    /// Register a description provider under an explicit name
    pub fn register_provider(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn DescriptionProvider>,
    ) {
        self.providers.insert(name.into(), provider);
    }

    /// Resolve the description provider for a class by naming convention
    pub fn provider_for(&self, class_name: &str) -> Option<Arc<dyn DescriptionProvider>> {
        let provider_name = format!("{class_name}{DESCRIPTION_PROVIDER_SUFFIX}");
        self.providers.get(&provider_name).cloned()
    }

    /// Number of registered classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("classes", &self.classes.len())
            .field("providers", &self.providers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::NoDescriptionProvider;

    #[test]
    fn test_register_and_lookup_class() {
        let mut registry = Registry::new();
        let class = ClassDef::builder("acme::Foo").public().build();
        registry.register_class(Arc::clone(&class));

        assert!(Arc::ptr_eq(registry.class("acme::Foo").unwrap(), &class));
        assert!(registry.class("acme::Bar").is_none());
    }

    #[test]
    fn test_provider_convention_lookup() {
        let mut registry = Registry::new();
        registry.register_provider(
            "acme::FooMBeanDescription",
            Arc::new(NoDescriptionProvider),
        );

        assert!(registry.provider_for("acme::Foo").is_some());
        assert!(registry.provider_for("acme::Bar").is_none());
    }
}
