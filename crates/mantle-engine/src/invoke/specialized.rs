//! Specialized pre-bound dispatch
//!
//! For each method of a management interface, a dispatch entry is compiled
//! ahead of time: the method handle plus one strict argument matcher per
//! parameter. A call that lines up exactly takes the direct path; any
//! mismatch at the cast boundary (argument shape, reference type name,
//! handler-side cast) silently falls through to the generic invoker for
//! that single call. Fallback is never visible to the caller.

use std::sync::Arc;

use mantle_sdk::{ClassDef, MethodDef, Value};
use rustc_hash::FxHashMap;

use crate::error::InvokeError;
use crate::invoke::generic::GenericInvoker;
use crate::managed::Managed;

/// Strict per-parameter matcher compiled from a declared type name
#[derive(Debug, Clone)]
enum ArgMatcher {
    Bool,
    I32,
    I64,
    F64,
    Str,
    List,
    /// Reference parameter: requires an `Opaque` carrying exactly this
    /// runtime type name (or `Null`)
    Reference(String),
}

impl ArgMatcher {
    fn compile(type_name: &str) -> Self {
        match type_name {
            "boolean" => ArgMatcher::Bool,
            "int" => ArgMatcher::I32,
            "long" => ArgMatcher::I64,
            "double" => ArgMatcher::F64,
            "string" => ArgMatcher::Str,
            name if name.ends_with("[]") => ArgMatcher::List,
            name => ArgMatcher::Reference(name.to_string()),
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (ArgMatcher::Bool, Value::Bool(_)) => true,
            (ArgMatcher::I32, Value::I32(_)) => true,
            (ArgMatcher::I64, Value::I64(_)) => true,
            (ArgMatcher::F64, Value::F64(_)) => true,
            (ArgMatcher::Str, Value::Str(_)) => true,
            (ArgMatcher::List, Value::List(_)) => true,
            (ArgMatcher::Reference(_), Value::Null) => true,
            (ArgMatcher::Reference(name), Value::Opaque(o)) => o.type_name() == name,
            _ => false,
        }
    }
}

/// One pre-compiled dispatch entry
struct CompiledMethod {
    method: Arc<MethodDef>,
    matchers: Vec<ArgMatcher>,
}

impl CompiledMethod {
    fn compile(method: Arc<MethodDef>) -> Self {
        let matchers = method.params().iter().map(|p| ArgMatcher::compile(p)).collect();
        Self { method, matchers }
    }

    fn matches_args(&self, args: &[Value]) -> bool {
        self.matchers.len() == args.len()
            && self.matchers.iter().zip(args).all(|(m, a)| m.matches(a))
    }
}

/// Pre-bound invoker for one management interface.
///
/// Owns a [`GenericInvoker`] for per-call fallback.
pub struct SpecializedInvoker {
    // Entries grouped by operation name; arity and signature disambiguate
    // within a group at dispatch time.
    table: FxHashMap<String, Vec<CompiledMethod>>,
    fallback: GenericInvoker,
}

impl SpecializedInvoker {
    /// Compile a dispatch table from the interface's public methods
    pub fn generate(iface: &Arc<ClassDef>) -> Self {
        let mut table: FxHashMap<String, Vec<CompiledMethod>> = FxHashMap::default();
        for method in iface.all_methods() {
            if !method.is_public() {
                continue;
            }
            let entries = table.entry(method.name().to_string()).or_default();
            // Interface inheritance can surface the same method twice.
            if entries.iter().any(|e| Arc::ptr_eq(&e.method, &method)) {
                continue;
            }
            entries.push(CompiledMethod::compile(method));
        }
        Self {
            table,
            fallback: GenericInvoker::new(),
        }
    }

    /// Number of distinct compiled entries
    pub fn entry_count(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    /// Dispatch a call: direct path when name, arity, signature, and
    /// argument shapes line up; generic fallback otherwise.
    pub fn invoke(
        &self,
        target: &dyn Managed,
        name: &str,
        signature: &[&str],
        args: &[Value],
    ) -> Result<Value, InvokeError> {
        if let Some(entry) = self.select(name, signature, args) {
            if entry.matches_args(args) {
                match entry.method.call(target.as_any(), args) {
                    Ok(value) => return Ok(value),
                    Err(err) if err.is_binding_failure() => {
                        log::trace!("specialized call of '{name}' missed ({err}), using generic path");
                    }
                    Err(err) => {
                        return Err(InvokeError::TargetError {
                            name: name.to_string(),
                            source: err,
                        });
                    }
                }
            }
        }
        self.fallback.invoke(target, name, signature, args)
    }

    fn select(&self, name: &str, signature: &[&str], args: &[Value]) -> Option<&CompiledMethod> {
        let candidates = self.table.get(name)?;
        candidates
            .iter()
            .filter(|c| c.method.params().len() == args.len())
            .find(|c| signature.is_empty() || c.method.matches_signature(signature))
    }
}

impl std::fmt::Debug for SpecializedInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecializedInvoker")
            .field("entries", &self.entry_count())
            .finish()
    }
}
