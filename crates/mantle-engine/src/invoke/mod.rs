//! Invocation dispatch
//!
//! One `invoke` contract, three interchangeable strategies behind an
//! explicit enum: a pre-bound specialized table (with built-in generic
//! fallback), plain generic reflective dispatch, and a caller-supplied
//! override. The specialized path is an optimization only; the generic path
//! carries correctness.
//!
//! Specialized-table generation sits behind [`SpecializedBackend`] with
//! capability detection, so a host without it transparently gets the
//! generic strategy.

pub mod generic;
pub mod specialized;

use std::sync::Arc;

use mantle_sdk::{ClassDef, Value};

use crate::config::IntrospectorConfig;
use crate::error::InvokeError;
use crate::managed::Managed;

pub use generic::GenericInvoker;
pub use specialized::SpecializedInvoker;

/// A caller-supplied invocation strategy
pub trait InvokeStrategy: Send + Sync {
    /// Call `name(signature)` on the target with the given arguments
    fn invoke(
        &self,
        target: &dyn Managed,
        name: &str,
        signature: &[&str],
        args: &[Value],
    ) -> Result<Value, InvokeError>;
}

/// Pluggable generator for the specialized dispatch path
pub trait SpecializedBackend: Send + Sync {
    /// Whether this backend can generate specialized dispatch at all
    fn can_generate(&self) -> bool;

    /// Generate a specialized invoker for the interface; `None` when
    /// generation fails for this particular interface
    fn generate(&self, iface: &Arc<ClassDef>) -> Option<SpecializedInvoker>;
}

/// Default backend: compiles an in-memory dispatch table
#[derive(Debug, Default, Clone, Copy)]
pub struct TableBackend;

impl SpecializedBackend for TableBackend {
    fn can_generate(&self) -> bool {
        true
    }

    fn generate(&self, iface: &Arc<ClassDef>) -> Option<SpecializedInvoker> {
        Some(SpecializedInvoker::generate(iface))
    }
}

/// The invoker bound to one management interface
pub enum Invoker {
    /// Pre-bound dispatch table with per-call generic fallback
    Specialized(SpecializedInvoker),
    /// Live reflective dispatch
    Generic(GenericInvoker),
    /// Caller-supplied override
    Custom(Arc<dyn InvokeStrategy>),
}

impl Invoker {
    /// Call `name(signature)` on the target with the given arguments
    pub fn invoke(
        &self,
        target: &dyn Managed,
        name: &str,
        signature: &[&str],
        args: &[Value],
    ) -> Result<Value, InvokeError> {
        match self {
            Invoker::Specialized(inv) => inv.invoke(target, name, signature, args),
            Invoker::Generic(inv) => inv.invoke(target, name, signature, args),
            Invoker::Custom(inv) => inv.invoke(target, name, signature, args),
        }
    }
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Invoker::Specialized(inv) => f.debug_tuple("Specialized").field(inv).finish(),
            Invoker::Generic(_) => f.debug_tuple("Generic").finish(),
            Invoker::Custom(_) => f.debug_tuple("Custom").finish(),
        }
    }
}

/// Choose the invoker for a management interface: a configured custom
/// invoker wins; otherwise the specialized path when the backend can
/// generate it; otherwise generic.
pub fn create_invoker(
    iface: &Arc<ClassDef>,
    config: &IntrospectorConfig,
    backend: &dyn SpecializedBackend,
) -> Invoker {
    if let Some(custom) = &config.custom_invoker {
        return Invoker::Custom(Arc::clone(custom));
    }
    if backend.can_generate() {
        if let Some(specialized) = backend.generate(iface) {
            return Invoker::Specialized(specialized);
        }
        log::debug!(
            "specialized generation failed for '{}', using generic dispatch",
            iface.name()
        );
    }
    Invoker::Generic(GenericInvoker::new())
}
