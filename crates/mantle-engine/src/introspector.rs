//! The introspection and dispatch front end
//!
//! An [`Introspector`] owns the configuration, the optional registry used
//! for description-provider lookup, the specialized-dispatch backend, and
//! the two identity caches. It is cheap to share behind an `Arc`; one
//! shared instance gives process-wide caching.

use std::sync::Arc;

use mantle_sdk::{
    ClassDef, DescriptionProvider, NoDescriptionProvider, Registry, Value,
};

use crate::cache::IdentityCache;
use crate::config::IntrospectorConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::InvokeError;
use crate::introspect::{builder, classify, Classification};
use crate::invoke::{create_invoker, GenericInvoker, Invoker, SpecializedBackend, TableBackend};
use crate::managed::Managed;

/// Introspects candidate objects, checks bean compliance, builds
/// descriptors, and dispatches invocations.
pub struct Introspector {
    config: IntrospectorConfig,
    registry: Option<Arc<Registry>>,
    backend: Arc<dyn SpecializedBackend>,
    descriptors: IdentityCache<Arc<TypeDescriptor>>,
    invokers: IdentityCache<Arc<Invoker>>,
}

impl Introspector {
    /// Introspector with default configuration and the table backend
    pub fn new() -> Self {
        Self::with_config(IntrospectorConfig::new())
    }

    /// Introspector with explicit configuration
    pub fn with_config(config: IntrospectorConfig) -> Self {
        Self {
            config,
            registry: None,
            backend: Arc::new(TableBackend),
            descriptors: IdentityCache::new(),
            invokers: IdentityCache::new(),
        }
    }

    /// Attach a registry used to resolve description providers by naming
    /// convention
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the specialized-dispatch backend
    pub fn with_backend(mut self, backend: Arc<dyn SpecializedBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Classify a candidate object
    pub fn classify(&self, target: &dyn Managed) -> Classification {
        classify(target, self.config.relaxed_interface_matching)
    }

    /// Decide whether the candidate forms a valid manageable bean.
    ///
    /// Never raises; every contributing cause collapses to `false` with
    /// detail at debug level.
    pub fn is_compliant(&self, target: &dyn Managed) -> bool {
        match self.classify(target) {
            Classification::Standard(iface) => {
                if !iface.is_public() {
                    log::debug!(
                        "management interface '{}' is not public",
                        iface.name()
                    );
                    return false;
                }
                match self.descriptor_for(target) {
                    Some(descriptor) => !descriptor.class_name.is_empty(),
                    None => false,
                }
            }
            Classification::Dynamic => match self.descriptor_for(target) {
                Some(descriptor) => !descriptor.class_name.is_empty(),
                None => false,
            },
            Classification::None => false,
        }
    }

    /// Produce (or look up) the descriptor for a candidate object.
    ///
    /// Standard beans are cached by implementation-class identity. Dynamic
    /// beans bypass the cache and are asked every time, since their shape
    /// may change; a failing self-report is treated as "no descriptor".
    pub fn descriptor_for(&self, target: &dyn Managed) -> Option<Arc<TypeDescriptor>> {
        match self.classify(target) {
            Classification::Standard(iface) => {
                let class = target.class();
                if let Some(cached) = self.descriptors.get(&class) {
                    return Some(cached);
                }
                // Built outside the cache lock; a concurrent duplicate
                // build publishes last-writer-wins.
                let provider = self.provider_for(class.name());
                let built = builder::build(&iface, &class, target, provider.as_ref())?;
                let descriptor = Arc::new(built);
                self.descriptors.insert(&class, Arc::clone(&descriptor));
                Some(descriptor)
            }
            Classification::Dynamic => {
                let dynamic = target.as_dynamic()?;
                match dynamic.descriptor() {
                    Ok(descriptor) => Some(Arc::new(descriptor)),
                    Err(err) => {
                        log::debug!("self-describing bean failed to report: {err}");
                        None
                    }
                }
            }
            Classification::None => None,
        }
    }

    /// Produce (or look up) the invoker for a management interface
    pub fn invoker_for(&self, iface: &Arc<ClassDef>) -> Arc<Invoker> {
        if let Some(cached) = self.invokers.get(iface) {
            return cached;
        }
        let invoker = Arc::new(create_invoker(iface, &self.config, self.backend.as_ref()));
        self.invokers.insert(iface, Arc::clone(&invoker));
        invoker
    }

    /// Resolve the invoker for the target and dispatch one call.
    ///
    /// Standard beans go through the cached per-interface invoker; anything
    /// else is served by plain generic dispatch against the target's own
    /// class.
    pub fn invoke(
        &self,
        target: &dyn Managed,
        name: &str,
        signature: &[&str],
        args: &[Value],
    ) -> Result<Value, InvokeError> {
        if name.is_empty() {
            return Err(InvokeError::BadArgument(
                "operation name must not be empty".to_string(),
            ));
        }
        match self.classify(target) {
            Classification::Standard(iface) => {
                self.invoker_for(&iface).invoke(target, name, signature, args)
            }
            _ => GenericInvoker::new().invoke(target, name, signature, args),
        }
    }

    /// The descriptor cache (exposed for retention inspection)
    pub fn descriptor_cache(&self) -> &IdentityCache<Arc<TypeDescriptor>> {
        &self.descriptors
    }

    /// The invoker cache (exposed for retention inspection)
    pub fn invoker_cache(&self) -> &IdentityCache<Arc<Invoker>> {
        &self.invokers
    }

    fn provider_for(&self, class_name: &str) -> Arc<dyn DescriptionProvider> {
        self.registry
            .as_ref()
            .and_then(|r| r.provider_for(class_name))
            .unwrap_or_else(|| Arc::new(NoDescriptionProvider))
    }
}

impl Default for Introspector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Introspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Introspector")
            .field("config", &self.config)
            .field("descriptors", &self.descriptors)
            .field("invokers", &self.invokers)
            .finish()
    }
}
