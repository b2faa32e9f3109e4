//! Structural descriptors for manageable types
//!
//! A [`TypeDescriptor`] is the immutable description of one manageable
//! type's surface: attributes, operations, constructors, and notifications.
//! Descriptors are built once per management interface, cached, and shared
//! read-only across callers. Equality is structural so that two independent
//! builds of the same interface compare equal.

use serde::Serialize;

/// Named, typed parameter of an operation or constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Declared type name
    pub type_name: String,
    /// Human-readable description, if a provider supplied one
    pub description: Option<String>,
}

/// A readable and/or writable named property derived from accessor methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDescriptor {
    /// Attribute name (accessor name with its `get`/`is`/`set` prefix removed)
    pub name: String,
    /// Declared value type name
    pub type_name: String,
    /// True when a getter exists
    pub readable: bool,
    /// True when a setter exists
    pub writable: bool,
    /// True when the getter is `is`-style (boolean)
    pub is_boolean_style: bool,
    /// Human-readable description, if a provider supplied one
    pub description: Option<String>,
}

/// A callable action that is not an attribute accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    /// Operation name; overloads appear as separate descriptors
    pub name: String,
    /// Parameters, in declaration order
    pub params: Vec<ParameterDescriptor>,
    /// Declared return type name
    pub return_type: String,
    /// Human-readable description, if a provider supplied one
    pub description: Option<String>,
}

/// One public constructor of the implementation type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorDescriptor {
    /// Constructor name (the implementation type's qualified name)
    pub name: String,
    /// Parameters, in declaration order
    pub params: Vec<ParameterDescriptor>,
    /// Human-readable description, if a provider supplied one
    pub description: Option<String>,
}

/// A notification category the type emits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationDescriptor {
    /// Notification class name
    pub name: String,
    /// Notification type strings
    pub notif_types: Vec<String>,
    /// Human-readable description
    pub description: Option<String>,
}

/// Immutable description of one manageable type's surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDescriptor {
    /// Qualified name of the described implementation type
    pub class_name: String,
    /// Attributes, unique by name, in first-seen order
    pub attributes: Vec<AttributeDescriptor>,
    /// Operations; same-named overloads are separate entries
    pub operations: Vec<OperationDescriptor>,
    /// Public constructors of the implementation type
    pub constructors: Vec<ConstructorDescriptor>,
    /// Self-reported notification categories
    pub notifications: Vec<NotificationDescriptor>,
}

impl TypeDescriptor {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// All operations with the given name (overloads included)
    pub fn operations_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a OperationDescriptor> {
        self.operations.iter().filter(move |o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TypeDescriptor {
        TypeDescriptor {
            class_name: "acme::Foo".into(),
            attributes: vec![AttributeDescriptor {
                name: "Bar".into(),
                type_name: "int".into(),
                readable: true,
                writable: true,
                is_boolean_style: false,
                description: None,
            }],
            operations: vec![
                OperationDescriptor {
                    name: "reset".into(),
                    params: vec![],
                    return_type: "void".into(),
                    description: None,
                },
                OperationDescriptor {
                    name: "reset".into(),
                    params: vec![ParameterDescriptor {
                        name: "p1".into(),
                        type_name: "int".into(),
                        description: None,
                    }],
                    return_type: "void".into(),
                    description: None,
                },
            ],
            constructors: vec![],
            notifications: vec![],
        }
    }

    #[test]
    fn test_attribute_lookup() {
        let d = sample();
        assert!(d.attribute("Bar").is_some());
        assert!(d.attribute("Baz").is_none());
    }

    #[test]
    fn test_overload_iteration() {
        let d = sample();
        assert_eq!(d.operations_named("reset").count(), 2);
        assert_eq!(d.operations_named("missing").count(), 0);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(sample(), sample());
        let mut other = sample();
        other.attributes[0].writable = false;
        assert_ne!(sample(), other);
    }

    #[test]
    fn test_serializes() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["class_name"], "acme::Foo");
        assert_eq!(json["attributes"][0]["name"], "Bar");
    }
}
