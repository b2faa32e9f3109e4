//! Generic reflective dispatch
//!
//! The universal fallback: a live method lookup by name and declared
//! parameter-type names against the target's runtime class, followed by a
//! handler call. Always correct; the specialized path is purely an
//! optimization layered on top of this.

use mantle_sdk::Value;

use crate::error::InvokeError;
use crate::managed::Managed;

/// Stateless reflective invoker
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericInvoker;

impl GenericInvoker {
    /// Create a generic invoker
    pub fn new() -> Self {
        Self
    }

    /// Resolve and call `name(signature)` on the target's runtime class.
    ///
    /// Lookup covers declared methods, implemented interfaces, and the
    /// superclass chain; only public methods are resolvable. A binding
    /// failure reported by the handler is a caller-input error here, since
    /// there is no further fallback.
    pub fn invoke(
        &self,
        target: &dyn Managed,
        name: &str,
        signature: &[&str],
        args: &[Value],
    ) -> Result<Value, InvokeError> {
        let class = target.class();
        let method = class
            .find_method(name, signature)
            .filter(|m| m.is_public())
            .ok_or_else(|| InvokeError::not_found(name, signature, class.name()))?;

        if args.len() != method.params().len() {
            return Err(InvokeError::BadArgument(format!(
                "operation '{}' takes {} arguments, got {}",
                name,
                method.params().len(),
                args.len()
            )));
        }

        method.call(target.as_any(), args).map_err(|err| {
            if err.is_binding_failure() {
                InvokeError::BadArgument(err.to_string())
            } else {
                InvokeError::TargetError {
                    name: name.to_string(),
                    source: err,
                }
            }
        })
    }
}
