//! Runtime method metadata
//!
//! A `MethodDef` describes one callable method of a runtime type: its name,
//! declared parameter type names, return type name, and the handler thunk
//! that performs the actual call against an untyped target. Method identity
//! is `Arc<MethodDef>` pointer identity — an interface method inherited
//! through several paths is the *same* method only when the same `Arc` is
//! reachable through each path.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::CallResult;
use crate::value::Value;

/// Handler thunk invoked for a method call.
///
/// The target is passed untyped; the handler performs the checked cast to
/// its concrete type and unboxes the arguments.
pub type MethodHandler = Arc<dyn Fn(&dyn Any, &[Value]) -> CallResult + Send + Sync>;

/// Metadata and dispatch thunk for one method of a runtime type
pub struct MethodDef {
    name: String,
    params: Vec<String>,
    return_type: String,
    is_public: bool,
    handler: MethodHandler,
}

impl MethodDef {
    /// Start building a method with the given name
    pub fn builder(name: impl Into<String>) -> MethodBuilder {
        MethodBuilder {
            name: name.into(),
            params: Vec::new(),
            return_type: crate::value::VOID.to_string(),
            is_public: true,
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter type names, in order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Declared return type name
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// Whether the method is publicly accessible
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// Call the method against an untyped target
    pub fn call(&self, target: &dyn Any, args: &[Value]) -> CallResult {
        (self.handler)(target, args)
    }

    /// True when the declared parameter type names equal `signature` exactly
    pub fn matches_signature(&self, signature: &[&str]) -> bool {
        self.params.len() == signature.len()
            && self.params.iter().zip(signature).all(|(p, s)| p == s)
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("is_public", &self.is_public)
            .finish()
    }
}

/// Builder for [`MethodDef`]
pub struct MethodBuilder {
    name: String,
    params: Vec<String>,
    return_type: String,
    is_public: bool,
}

impl MethodBuilder {
    /// Append a parameter type name
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.params.push(type_name.into());
        self
    }

    /// Set the return type name (defaults to `void`)
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = type_name.into();
        self
    }

    /// Mark the method as non-public
    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Attach the handler and finish
    pub fn handler<F>(self, f: F) -> Arc<MethodDef>
    where
        F: Fn(&dyn Any, &[Value]) -> CallResult + Send + Sync + 'static,
    {
        Arc::new(MethodDef {
            name: self.name,
            params: self.params,
            return_type: self.return_type,
            is_public: self.is_public,
            handler: Arc::new(f),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let m = MethodDef::builder("reset").handler(|_, _| Ok(Value::Null));
        assert_eq!(m.name(), "reset");
        assert!(m.params().is_empty());
        assert_eq!(m.return_type(), "void");
        assert!(m.is_public());
    }

    #[test]
    fn test_signature_match() {
        let m = MethodDef::builder("send")
            .param("string")
            .param("int")
            .returns("boolean")
            .handler(|_, _| Ok(Value::Bool(true)));
        assert!(m.matches_signature(&["string", "int"]));
        assert!(!m.matches_signature(&["string"]));
        assert!(!m.matches_signature(&["string", "long"]));
    }

    #[test]
    fn test_call_through_handler() {
        struct Counter(i32);
        let m = MethodDef::builder("value")
            .returns("int")
            .handler(|target, _| {
                let c = target
                    .downcast_ref::<Counter>()
                    .ok_or_else(|| crate::CallError::TypeMismatch {
                        expected: "Counter".into(),
                        got: "?".into(),
                    })?;
                Ok(Value::I32(c.0))
            });
        let c = Counter(11);
        assert_eq!(m.call(&c, &[]).unwrap().as_i32().unwrap(), 11);
    }
}
