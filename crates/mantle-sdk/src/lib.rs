//! Mantle SDK - runtime type model for manageable objects
//!
//! This crate provides the minimal types needed to declare manageable
//! runtime types without depending on the full mantle-engine: a dynamic
//! [`Value`] representation, [`ClassDef`]/[`MethodDef`]/[`ConstructorDef`]
//! runtime metadata with builder APIs, the name-keyed [`Registry`], and the
//! [`DescriptionProvider`] boundary trait.
//!
//! # Example
//!
//! ```ignore
//! use mantle_sdk::{ClassDef, MethodDef, Value};
//!
//! let iface = ClassDef::builder("acme::FooMBean")
//!     .public()
//!     .interface()
//!     .method(MethodDef::builder("getBar").returns("int").handler(|t, _| {
//!         let foo = t.downcast_ref::<Foo>().ok_or("not a Foo")?;
//!         Ok(Value::I32(foo.bar))
//!     }))
//!     .build();
//! ```

#![warn(missing_docs)]

mod class;
mod error;
mod method;
mod provider;
mod registry;
mod value;

pub use class::{simple_name, strip_enclosing, strip_modules, ClassBuilder, ClassDef, ConstructorDef};
pub use error::{CallError, CallResult};
pub use method::{MethodBuilder, MethodDef, MethodHandler};
pub use provider::{DescriptionProvider, NoDescriptionProvider};
pub use registry::{Registry, DESCRIPTION_PROVIDER_SUFFIX};
pub use value::{OpaqueValue, Value, VOID};
