//! Capability traits for manageable objects
//!
//! [`Managed`] is the one trait every candidate object implements: it ties
//! the live object to its runtime [`ClassDef`] and exposes optional
//! capability hooks. The default hooks return `None`; a self-describing
//! bean overrides [`Managed::as_dynamic`], a notification emitter overrides
//! [`Managed::as_notification_source`].

use std::any::Any;
use std::sync::Arc;

use mantle_sdk::{CallError, ClassDef};

use crate::descriptor::{NotificationDescriptor, TypeDescriptor};

/// A live object that can be introspected and invoked through the dispatcher
pub trait Managed: Send + Sync {
    /// The object, untyped, for handler-side casts
    fn as_any(&self) -> &dyn Any;

    /// Runtime class of the object
    fn class(&self) -> Arc<ClassDef>;

    /// Self-describing capability, if the object reports its own descriptor
    fn as_dynamic(&self) -> Option<&dyn DynamicBean> {
        None
    }

    /// Notification-source capability, if the object emits notifications
    fn as_notification_source(&self) -> Option<&dyn NotificationSource> {
        None
    }
}

/// A bean that reports its own manageable surface directly.
///
/// A failing or misbehaving implementation is treated as "no descriptor
/// available", never propagated.
pub trait DynamicBean {
    /// The bean's self-reported descriptor
    fn descriptor(&self) -> Result<TypeDescriptor, CallError>;
}

/// A bean that emits notifications and reports their categories.
///
/// Failure is treated as an empty list.
pub trait NotificationSource {
    /// Self-reported notification categories
    fn notification_descriptors(&self) -> Result<Vec<NotificationDescriptor>, CallError>;
}
