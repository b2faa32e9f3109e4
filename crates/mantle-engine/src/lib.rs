//! Mantle engine: management-bean introspection and invocation dispatch
//!
//! Given a live object and its runtime class, the engine classifies it as a
//! standard bean (managed through a companion `<Name>MBean` interface) or a
//! dynamic self-describing bean, checks compliance with the bean contract,
//! synthesizes an immutable [`TypeDescriptor`] of its manageable surface,
//! and dispatches named operations through a two-tier invoker: a
//! pre-compiled specialized table that silently falls back to generic
//! reflective dispatch on any cast or visibility mismatch.
//!
//! Descriptors and invokers are cached per type identity with weakly held
//! keys; an unused type's entries are swept once nothing else references it.
//!
//! ```ignore
//! let introspector = Introspector::new();
//! assert!(introspector.is_compliant(&foo));
//! let value = introspector.invoke(&foo, "getBar", &[], &[])?;
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod introspect;
pub mod invoke;
pub mod managed;

mod introspector;

pub use cache::IdentityCache;
pub use config::IntrospectorConfig;
pub use descriptor::{
    AttributeDescriptor, ConstructorDescriptor, NotificationDescriptor, OperationDescriptor,
    ParameterDescriptor, TypeDescriptor,
};
pub use error::InvokeError;
pub use introspect::{Classification, MANAGEMENT_SUFFIX};
pub use introspector::Introspector;
pub use invoke::{
    GenericInvoker, InvokeStrategy, Invoker, SpecializedBackend, SpecializedInvoker, TableBackend,
};
pub use managed::{DynamicBean, Managed, NotificationSource};

// The runtime type model the engine consumes.
pub use mantle_sdk as sdk;
