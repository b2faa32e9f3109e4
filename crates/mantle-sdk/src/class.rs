//! Runtime class metadata
//!
//! A `ClassDef` describes one runtime type: its qualified name, visibility,
//! superclass, implemented interfaces, constructors, and declared methods.
//! Qualified names use `::` between module segments and `.` before a nested
//! type, e.g. `acme::net::Server.Connector`.
//!
//! Type identity is `Arc<ClassDef>` pointer identity; two structurally equal
//! defs are still distinct types.

use std::fmt;
use std::sync::Arc;

use crate::method::MethodDef;

/// Strip module qualifiers from a qualified name (`a::b::C.D` -> `C.D`)
pub fn strip_modules(name: &str) -> &str {
    match name.rfind("::") {
        Some(idx) => &name[idx + 2..],
        None => name,
    }
}

/// Strip enclosing-type qualifiers from a module-free name (`C.D` -> `D`)
pub fn strip_enclosing(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Simple name: qualified name with module and enclosing qualifiers removed
pub fn simple_name(name: &str) -> &str {
    strip_enclosing(strip_modules(name))
}

/// Metadata for one constructor of a runtime type
#[derive(Debug, Clone)]
pub struct ConstructorDef {
    params: Vec<String>,
    is_public: bool,
}

impl ConstructorDef {
    /// A public constructor with the given parameter type names
    pub fn new(params: Vec<String>) -> Self {
        Self {
            params,
            is_public: true,
        }
    }

    /// A non-public constructor with the given parameter type names
    pub fn non_public(params: Vec<String>) -> Self {
        Self {
            params,
            is_public: false,
        }
    }

    /// Declared parameter type names, in order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Whether the constructor is publicly accessible
    pub fn is_public(&self) -> bool {
        self.is_public
    }
}

/// Metadata for one runtime type
pub struct ClassDef {
    name: String,
    is_public: bool,
    is_interface: bool,
    superclass: Option<Arc<ClassDef>>,
    interfaces: Vec<Arc<ClassDef>>,
    constructors: Vec<ConstructorDef>,
    methods: Vec<Arc<MethodDef>>,
}

impl ClassDef {
    /// Start building a class with the given qualified name
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            is_public: false,
            is_interface: false,
            superclass: None,
            interfaces: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Qualified name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Simple name (module and enclosing qualifiers removed)
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Whether the type is publicly accessible
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// Whether the type is an interface
    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    /// Superclass, if any
    pub fn superclass(&self) -> Option<&Arc<ClassDef>> {
        self.superclass.as_ref()
    }

    /// Directly implemented (or extended) interfaces
    pub fn interfaces(&self) -> &[Arc<ClassDef>] {
        &self.interfaces
    }

    /// Declared constructors
    pub fn constructors(&self) -> &[ConstructorDef] {
        &self.constructors
    }

    /// Declared methods (not including inherited ones)
    pub fn methods(&self) -> &[Arc<MethodDef>] {
        &self.methods
    }

    /// Superclass chain starting at this type
    pub fn ancestry(self: &Arc<Self>) -> Vec<Arc<ClassDef>> {
        let mut chain = vec![Arc::clone(self)];
        let mut current = self.superclass.clone();
        while let Some(class) = current {
            current = class.superclass.clone();
            chain.push(class);
        }
        chain
    }

    /// All methods reachable from this type: declared methods, then methods
    /// of directly and transitively implemented interfaces, then inherited
    /// methods up the superclass chain. Duplicates introduced by interface
    /// inheritance are preserved (same `Arc` appearing more than once).
    pub fn all_methods(self: &Arc<Self>) -> Vec<Arc<MethodDef>> {
        let mut out = Vec::new();
        for class in self.ancestry() {
            out.extend(class.methods.iter().cloned());
            for iface in &class.interfaces {
                Self::collect_interface_methods(iface, &mut out);
            }
        }
        out
    }

    fn collect_interface_methods(iface: &Arc<ClassDef>, out: &mut Vec<Arc<MethodDef>>) {
        out.extend(iface.methods.iter().cloned());
        for parent in &iface.interfaces {
            Self::collect_interface_methods(parent, out);
        }
    }

    /// True when this type implements (or extends) the given interface,
    /// directly or transitively, including through the superclass chain.
    /// Matching is by type identity.
    pub fn implements(self: &Arc<Self>, iface: &Arc<ClassDef>) -> bool {
        if Arc::ptr_eq(self, iface) {
            return true;
        }
        for class in self.ancestry() {
            for direct in &class.interfaces {
                if Self::interface_reaches(direct, iface) {
                    return true;
                }
            }
        }
        false
    }

    fn interface_reaches(from: &Arc<ClassDef>, to: &Arc<ClassDef>) -> bool {
        if Arc::ptr_eq(from, to) {
            return true;
        }
        from.interfaces
            .iter()
            .any(|parent| Self::interface_reaches(parent, to))
    }

    /// Find a declared-or-inherited method by name and exact parameter
    /// signature. Returns the first match in `all_methods` order.
    pub fn find_method(self: &Arc<Self>, name: &str, signature: &[&str]) -> Option<Arc<MethodDef>> {
        self.all_methods()
            .into_iter()
            .find(|m| m.name() == name && m.matches_signature(signature))
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("is_public", &self.is_public)
            .field("is_interface", &self.is_interface)
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// Builder for [`ClassDef`]
pub struct ClassBuilder {
    name: String,
    is_public: bool,
    is_interface: bool,
    superclass: Option<Arc<ClassDef>>,
    interfaces: Vec<Arc<ClassDef>>,
    constructors: Vec<ConstructorDef>,
    methods: Vec<Arc<MethodDef>>,
}

impl ClassBuilder {
    /// Mark the type as public
    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// Mark the type as an interface
    pub fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: Arc<ClassDef>) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add an implemented (or, for interfaces, extended) interface
    pub fn implements(mut self, iface: Arc<ClassDef>) -> Self {
        self.interfaces.push(iface);
        self
    }

    /// Add a constructor
    pub fn constructor(mut self, ctor: ConstructorDef) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Add a declared method
    pub fn method(mut self, method: Arc<MethodDef>) -> Self {
        self.methods.push(method);
        self
    }

    /// Finish, producing the shared type identity
    pub fn build(self) -> Arc<ClassDef> {
        Arc::new(ClassDef {
            name: self.name,
            is_public: self.is_public,
            is_interface: self.is_interface,
            superclass: self.superclass,
            interfaces: self.interfaces,
            constructors: self.constructors,
            methods: self.methods,
        })
    }
}
