//! Description provider boundary
//!
//! An optional, per-implementation-type collaborator supplying human-readable
//! descriptions for attributes, operations, constructors, and their
//! parameters. Providers are resolved by naming convention through the
//! [`Registry`](crate::Registry); absence of a provider defaults every
//! description to `None` and is never an error.

use crate::class::ConstructorDef;
use crate::method::MethodDef;

/// Supplies human-readable descriptions for one implementation type.
///
/// Every method defaults to `None` ("no description").
#[allow(unused_variables)]
pub trait DescriptionProvider: Send + Sync {
    /// Description of a named attribute
    fn attribute_description(&self, attribute: &str) -> Option<String> {
        None
    }

    /// Description of an operation
    fn operation_description(&self, method: &MethodDef) -> Option<String> {
        None
    }

    /// Name of an operation parameter
    fn operation_parameter_name(&self, method: &MethodDef, index: usize) -> Option<String> {
        None
    }

    /// Description of an operation parameter
    fn operation_parameter_description(&self, method: &MethodDef, index: usize) -> Option<String> {
        None
    }

    /// Description of a constructor
    fn constructor_description(&self, ctor: &ConstructorDef) -> Option<String> {
        None
    }

    /// Name of a constructor parameter
    fn constructor_parameter_name(&self, ctor: &ConstructorDef, index: usize) -> Option<String> {
        None
    }

    /// Description of a constructor parameter
    fn constructor_parameter_description(&self, ctor: &ConstructorDef, index: usize) -> Option<String> {
        None
    }
}

/// Provider with no descriptions at all; used when convention lookup finds
/// nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDescriptionProvider;

impl DescriptionProvider for NoDescriptionProvider {}
