//! Bean classification
//!
//! Decides how a candidate object is managed: a self-describing bean is
//! `Dynamic` and trusted as-is; otherwise the candidate's class and its
//! superclass chain are searched for a companion interface named
//! `<ClassSimpleName>MBean`. A candidate matching neither style is not
//! manageable.

use std::sync::Arc;

use mantle_sdk::{strip_enclosing, strip_modules, ClassDef};

use crate::managed::Managed;

/// Suffix a companion management interface carries on top of its class name
pub const MANAGEMENT_SUFFIX: &str = "MBean";

/// How a candidate object is managed
#[derive(Debug, Clone)]
pub enum Classification {
    /// Managed through the bound companion interface
    Standard(Arc<ClassDef>),
    /// Self-describing; the object reports its own descriptor
    Dynamic,
    /// Not manageable
    None,
}

impl Classification {
    /// True for `Standard` or `Dynamic`
    pub fn is_manageable(&self) -> bool {
        !matches!(self, Classification::None)
    }
}

/// Classify a candidate object.
///
/// Self-description takes precedence: a bean exposing the dynamic capability
/// is `Dynamic` even when a matching companion interface also exists. The
/// standard search walks the superclass chain from the candidate's own class
/// upward so a subclass of a standard bean is itself standard.
pub fn classify(target: &dyn Managed, relaxed: bool) -> Classification {
    if target.as_dynamic().is_some() {
        return Classification::Dynamic;
    }

    let class = target.class();
    for candidate in class.ancestry() {
        if let Some(iface) = find_management_interface(&candidate, relaxed) {
            return Classification::Standard(iface);
        }
    }

    log::debug!("class '{}' matches neither bean style", class.name());
    Classification::None
}

/// Find the companion management interface of one class: an implemented
/// interface whose qualified name is the class's qualified name plus the
/// `MBean` suffix. In relaxed mode, retry after stripping module qualifiers,
/// then after stripping enclosing-type qualifiers, in exactly that order.
fn find_management_interface(class: &Arc<ClassDef>, relaxed: bool) -> Option<Arc<ClassDef>> {
    let implemented = implemented_interfaces(class);
    let wanted = format!("{}{MANAGEMENT_SUFFIX}", class.name());

    if let Some(found) = implemented.iter().find(|i| i.name() == wanted) {
        return Some(Arc::clone(found));
    }
    if !relaxed {
        return None;
    }

    // Relaxed retry 1: compare with module qualifiers stripped.
    let wanted = format!("{}{MANAGEMENT_SUFFIX}", strip_modules(class.name()));
    if let Some(found) = implemented
        .iter()
        .find(|i| strip_modules(i.name()) == wanted)
    {
        return Some(Arc::clone(found));
    }

    // Relaxed retry 2: compare with enclosing-type qualifiers stripped too.
    let wanted = format!("{}{MANAGEMENT_SUFFIX}", class.simple_name());
    implemented
        .iter()
        .find(|i| strip_enclosing(strip_modules(i.name())) == wanted)
        .map(Arc::clone)
}

/// All interfaces the class implements, directly or through interface
/// extension, not following the superclass chain (each ancestor is searched
/// separately against its own name).
fn implemented_interfaces(class: &Arc<ClassDef>) -> Vec<Arc<ClassDef>> {
    let mut out = Vec::new();
    for direct in class.interfaces() {
        collect(direct, &mut out);
    }
    out
}

fn collect(iface: &Arc<ClassDef>, out: &mut Vec<Arc<ClassDef>>) {
    if out.iter().any(|seen| Arc::ptr_eq(seen, iface)) {
        return;
    }
    out.push(Arc::clone(iface));
    for parent in iface.interfaces() {
        collect(parent, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bean {
        class: Arc<ClassDef>,
    }

    impl Managed for Bean {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn class(&self) -> Arc<ClassDef> {
            Arc::clone(&self.class)
        }
    }

    fn iface(name: &str) -> Arc<ClassDef> {
        ClassDef::builder(name).public().interface().build()
    }

    #[test]
    fn test_exact_match_is_standard() {
        let mbean = iface("acme::FooMBean");
        let class = ClassDef::builder("acme::Foo")
            .public()
            .implements(Arc::clone(&mbean))
            .build();
        let bean = Bean { class };

        match classify(&bean, false) {
            Classification::Standard(found) => assert!(Arc::ptr_eq(&found, &mbean)),
            other => panic!("expected Standard, got {other:?}"),
        }
    }

    #[test]
    fn test_no_interface_is_none() {
        let class = ClassDef::builder("acme::Foo").public().build();
        let bean = Bean { class };
        assert!(!classify(&bean, false).is_manageable());
    }

    #[test]
    fn test_wrong_module_requires_relaxed() {
        // Interface lives in a different module than the class.
        let mbean = iface("other::FooMBean");
        let class = ClassDef::builder("acme::Foo")
            .public()
            .implements(Arc::clone(&mbean))
            .build();

        let bean = Bean { class };
        assert!(!classify(&bean, false).is_manageable());
        match classify(&bean, true) {
            Classification::Standard(found) => assert!(Arc::ptr_eq(&found, &mbean)),
            other => panic!("expected Standard, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_interface_requires_second_retry() {
        // Interface is nested in an enclosing type; only the final retry
        // (enclosing qualifiers stripped) can match it.
        let mbean = iface("acme::Outer.FooMBean");
        let class = ClassDef::builder("acme::Foo")
            .public()
            .implements(Arc::clone(&mbean))
            .build();

        let bean = Bean { class };
        assert!(!classify(&bean, false).is_manageable());
        assert!(classify(&bean, true).is_manageable());
    }

    #[test]
    fn test_inherited_interface_matches_ancestor_name() {
        // Child has no ParentMBean of its own, but Parent does; the search
        // walks the superclass chain and matches each ancestor's name.
        let mbean = iface("acme::ParentMBean");
        let parent = ClassDef::builder("acme::Parent")
            .public()
            .implements(Arc::clone(&mbean))
            .build();
        let child = ClassDef::builder("acme::Child").public().extends(parent).build();

        let bean = Bean { class: child };
        match classify(&bean, false) {
            Classification::Standard(found) => assert!(Arc::ptr_eq(&found, &mbean)),
            other => panic!("expected Standard, got {other:?}"),
        }
    }
}
