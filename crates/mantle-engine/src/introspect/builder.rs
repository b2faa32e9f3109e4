//! Descriptor construction
//!
//! Builds a [`TypeDescriptor`] from a management interface and its
//! implementation class: constructors from the implementation type,
//! attributes from getter/setter accessor pairs, every remaining interface
//! method as an operation, and notifications from the target's own
//! notification-source capability.
//!
//! Any accessor conflict aborts the whole build. A conflict is not an
//! error: the build returns `None` and the candidate is reported
//! non-compliant, with detail at debug level only.

use std::sync::Arc;

use mantle_sdk::{ClassDef, ConstructorDef, DescriptionProvider, MethodDef, VOID};

use crate::descriptor::{
    AttributeDescriptor, ConstructorDescriptor, OperationDescriptor, ParameterDescriptor,
    TypeDescriptor,
};
use crate::managed::Managed;

/// How one interface method participates in the manageable surface
enum Accessor {
    /// `getX`/`isX`: zero parameters, non-void return (`isX` must be boolean)
    Getter {
        attr: String,
        type_name: String,
        boolean_style: bool,
    },
    /// `setX`: one parameter, void return
    Setter { attr: String, type_name: String },
    /// Anything else is an operation
    Operation,
}

/// Classify a method by accessor shape
fn classify_accessor(method: &MethodDef) -> Accessor {
    let name = method.name();
    if let Some(attr) = name.strip_prefix("get") {
        if !attr.is_empty() && method.params().is_empty() && method.return_type() != VOID {
            return Accessor::Getter {
                attr: attr.to_string(),
                type_name: method.return_type().to_string(),
                boolean_style: false,
            };
        }
    }
    if let Some(attr) = name.strip_prefix("is") {
        if !attr.is_empty() && method.params().is_empty() && method.return_type() == "boolean" {
            return Accessor::Getter {
                attr: attr.to_string(),
                type_name: "boolean".to_string(),
                boolean_style: true,
            };
        }
    }
    if let Some(attr) = name.strip_prefix("set") {
        if !attr.is_empty() && method.params().len() == 1 && method.return_type() == VOID {
            return Accessor::Setter {
                attr: attr.to_string(),
                type_name: method.params()[0].clone(),
            };
        }
    }
    Accessor::Operation
}

/// In-progress attribute state during the accessor scan
struct AttrEntry {
    name: String,
    type_name: String,
    readable: bool,
    writable: bool,
    boolean_style: bool,
    // Underlying getter method, kept to recognize interface duplication.
    getter: Option<Arc<MethodDef>>,
}

/// Build a descriptor for a standard bean.
///
/// `iface` supplies attributes and operations, `impl_class` supplies the
/// class name and constructors, `target` supplies notifications. Returns
/// `None` on any accessor conflict.
pub(crate) fn build(
    iface: &Arc<ClassDef>,
    impl_class: &Arc<ClassDef>,
    target: &dyn Managed,
    provider: &dyn DescriptionProvider,
) -> Option<TypeDescriptor> {
    let mut attributes: Vec<AttrEntry> = Vec::new();
    let mut operations = Vec::new();

    for method in iface.all_methods() {
        if !method.is_public() {
            continue;
        }
        match classify_accessor(&method) {
            Accessor::Getter {
                attr,
                type_name,
                boolean_style,
            } => merge_getter(&mut attributes, &method, attr, type_name, boolean_style)?,
            Accessor::Setter { attr, type_name } => {
                merge_setter(&mut attributes, attr, type_name)?
            }
            Accessor::Operation => operations.push(operation_descriptor(&method, provider)),
        }
    }

    Some(TypeDescriptor {
        class_name: impl_class.name().to_string(),
        attributes: attributes
            .into_iter()
            .map(|entry| AttributeDescriptor {
                description: provider.attribute_description(&entry.name),
                name: entry.name,
                type_name: entry.type_name,
                readable: entry.readable,
                writable: entry.writable,
                is_boolean_style: entry.boolean_style,
            })
            .collect(),
        operations,
        constructors: constructor_descriptors(impl_class, provider),
        notifications: notification_descriptors(target),
    })
}

/// Fold a getter into the attribute set; `None` on conflict.
fn merge_getter(
    attributes: &mut Vec<AttrEntry>,
    method: &Arc<MethodDef>,
    attr: String,
    type_name: String,
    boolean_style: bool,
) -> Option<()> {
    let Some(entry) = attributes.iter_mut().find(|e| e.name == attr) else {
        attributes.push(AttrEntry {
            name: attr,
            type_name,
            readable: true,
            writable: false,
            boolean_style,
            getter: Some(Arc::clone(method)),
        });
        return Some(());
    };

    if entry.readable {
        // A `get` and an `is` getter for the same attribute is always
        // ambiguous, even when both would be boolean.
        if entry.boolean_style != boolean_style {
            log::debug!("attribute '{}': both is-style and get-style getters", entry.name);
            return None;
        }
        if entry.type_name != type_name {
            log::debug!(
                "attribute '{}': getters disagree on type ({} vs {})",
                entry.name,
                entry.type_name,
                type_name
            );
            return None;
        }
        // Same name and type: only tolerated when it is the exact same
        // underlying method seen again through interface inheritance.
        let duplicated = entry
            .getter
            .as_ref()
            .is_some_and(|existing| Arc::ptr_eq(existing, method));
        if !duplicated {
            log::debug!("attribute '{}': overloaded getter", entry.name);
            return None;
        }
        return Some(());
    }

    // Entry created by a setter; the value types must agree.
    if entry.type_name != type_name {
        log::debug!(
            "attribute '{}': getter type {} does not match setter type {}",
            entry.name,
            type_name,
            entry.type_name
        );
        return None;
    }
    entry.readable = true;
    entry.boolean_style = boolean_style;
    entry.getter = Some(Arc::clone(method));
    Some(())
}

/// Fold a setter into the attribute set; `None` on conflict.
fn merge_setter(
    attributes: &mut Vec<AttrEntry>,
    attr: String,
    type_name: String,
) -> Option<()> {
    let Some(entry) = attributes.iter_mut().find(|e| e.name == attr) else {
        attributes.push(AttrEntry {
            name: attr,
            type_name,
            readable: false,
            writable: true,
            boolean_style: false,
            getter: None,
        });
        return Some(());
    };

    if entry.type_name != type_name {
        log::debug!(
            "attribute '{}': setter type {} does not match {}",
            entry.name,
            type_name,
            entry.type_name
        );
        return None;
    }
    entry.writable = true;
    Some(())
}

fn operation_descriptor(
    method: &Arc<MethodDef>,
    provider: &dyn DescriptionProvider,
) -> OperationDescriptor {
    let params = method
        .params()
        .iter()
        .enumerate()
        .map(|(i, type_name)| ParameterDescriptor {
            name: provider
                .operation_parameter_name(method, i)
                .unwrap_or_else(|| default_param_name(i)),
            type_name: type_name.clone(),
            description: provider.operation_parameter_description(method, i),
        })
        .collect();
    OperationDescriptor {
        name: method.name().to_string(),
        params,
        return_type: method.return_type().to_string(),
        description: provider.operation_description(method),
    }
}

fn constructor_descriptors(
    impl_class: &Arc<ClassDef>,
    provider: &dyn DescriptionProvider,
) -> Vec<ConstructorDescriptor> {
    impl_class
        .constructors()
        .iter()
        .filter(|c| c.is_public())
        .map(|ctor| constructor_descriptor(impl_class, ctor, provider))
        .collect()
}

fn constructor_descriptor(
    impl_class: &Arc<ClassDef>,
    ctor: &ConstructorDef,
    provider: &dyn DescriptionProvider,
) -> ConstructorDescriptor {
    let params = ctor
        .params()
        .iter()
        .enumerate()
        .map(|(i, type_name)| ParameterDescriptor {
            name: provider
                .constructor_parameter_name(ctor, i)
                .unwrap_or_else(|| default_param_name(i)),
            type_name: type_name.clone(),
            description: provider.constructor_parameter_description(ctor, i),
        })
        .collect();
    ConstructorDescriptor {
        name: impl_class.name().to_string(),
        params,
        description: provider.constructor_description(ctor),
    }
}

/// Notification list from the target's own capability; failure or absence
/// collapses to empty.
pub(crate) fn notification_descriptors(
    target: &dyn Managed,
) -> Vec<crate::descriptor::NotificationDescriptor> {
    match target.as_notification_source() {
        Some(source) => match source.notification_descriptors() {
            Ok(list) => list,
            Err(err) => {
                log::debug!("notification source failed, treating as empty: {err}");
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}

fn default_param_name(index: usize) -> String {
    format!("p{}", index + 1)
}
