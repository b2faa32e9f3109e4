//! Dynamic value representation for manageable-object calls
//!
//! Arguments and return values cross the dispatch boundary as `Value`s:
//! primitives are carried inline, reference values are carried as shared
//! `Opaque` handles tagged with their runtime type name. Conversion to a
//! concrete Rust type happens at the call boundary via the checked
//! accessors below.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::CallError;

/// Canonical type name for the unit/void return type
pub const VOID: &str = "void";

/// A reference value: a shared opaque handle plus its runtime type name.
#[derive(Clone)]
pub struct OpaqueValue {
    type_name: String,
    value: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    /// Wrap a concrete value under the given runtime type name
    pub fn new(type_name: impl Into<String>, value: impl Any + Send + Sync) -> Self {
        Self {
            type_name: type_name.into(),
            value: Arc::new(value),
        }
    }

    /// Runtime type name of the wrapped value
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Downcast to a concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueValue")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Dynamic value passed to and returned from manageable-object methods
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value / void return
    #[default]
    Null,
    /// Boolean (`boolean`)
    Bool(bool),
    /// 32-bit integer (`int`)
    I32(i32),
    /// 64-bit integer (`long`)
    I64(i64),
    /// Double-precision float (`double`)
    F64(f64),
    /// String (`string`)
    Str(String),
    /// Ordered sequence (`<element>[]`)
    List(Vec<Value>),
    /// Reference value with a runtime type name
    Opaque(OpaqueValue),
}

impl Value {
    /// Wrap a concrete value as an `Opaque` under the given type name
    pub fn opaque(type_name: impl Into<String>, value: impl Any + Send + Sync) -> Self {
        Value::Opaque(OpaqueValue::new(type_name, value))
    }

    /// Runtime type name of this value
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::I32(_) => "int",
            Value::I64(_) => "long",
            Value::F64(_) => "double",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Opaque(o) => o.type_name(),
        }
    }

    /// True for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // ========================================================================
    // Checked accessors (the unboxing side of the call boundary)
    // ========================================================================

    /// Unbox as `bool`
    pub fn as_bool(&self) -> Result<bool, CallError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(Self::mismatch("boolean", other)),
        }
    }

    /// Unbox as `i32`
    pub fn as_i32(&self) -> Result<i32, CallError> {
        match self {
            Value::I32(i) => Ok(*i),
            other => Err(Self::mismatch("int", other)),
        }
    }

    /// Unbox as `i64`, widening from `int`
    pub fn as_i64(&self) -> Result<i64, CallError> {
        match self {
            Value::I64(i) => Ok(*i),
            Value::I32(i) => Ok(*i as i64),
            other => Err(Self::mismatch("long", other)),
        }
    }

    /// Unbox as `f64`
    pub fn as_f64(&self) -> Result<f64, CallError> {
        match self {
            Value::F64(f) => Ok(*f),
            other => Err(Self::mismatch("double", other)),
        }
    }

    /// Borrow as `&str`
    pub fn as_str(&self) -> Result<&str, CallError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(Self::mismatch("string", other)),
        }
    }

    /// Borrow as a list slice
    pub fn as_list(&self) -> Result<&[Value], CallError> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(Self::mismatch("list", other)),
        }
    }

    /// Checked cast of a reference value to a concrete type
    pub fn downcast_ref<T: Any>(&self, expected: &str) -> Result<&T, CallError> {
        match self {
            Value::Opaque(o) => o
                .downcast_ref::<T>()
                .ok_or_else(|| Self::mismatch(expected, self)),
            other => Err(Self::mismatch(expected, other)),
        }
    }

    fn mismatch(expected: &str, got: &Value) -> CallError {
        CallError::TypeMismatch {
            expected: expected.to_string(),
            got: got.type_name().to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::I32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::I64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::F64(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}
