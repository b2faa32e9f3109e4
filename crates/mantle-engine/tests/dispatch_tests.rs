//! End-to-end dispatch, fallback, and cache-retention tests

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use mantle_engine::{
    GenericInvoker, Introspector, IntrospectorConfig, InvokeError, InvokeStrategy, Managed,
    SpecializedInvoker,
};
use mantle_sdk::{CallError, ClassDef, MethodDef, Value};

// ============================================================================
// Fixtures
// ============================================================================

struct Foo {
    class: Arc<ClassDef>,
    bar: AtomicI32,
}

impl Managed for Foo {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn class(&self) -> Arc<ClassDef> {
        Arc::clone(&self.class)
    }
}

fn downcast_foo(t: &dyn std::any::Any) -> Result<&Foo, CallError> {
    t.downcast_ref::<Foo>().ok_or(CallError::TypeMismatch {
        expected: "acme::Foo".into(),
        got: "?".into(),
    })
}

fn foo_mbean() -> Arc<ClassDef> {
    ClassDef::builder("acme::FooMBean")
        .public()
        .interface()
        .method(
            MethodDef::builder("getBar").returns("int").handler(|t, _| {
                Ok(Value::I32(downcast_foo(t)?.bar.load(Ordering::SeqCst)))
            }),
        )
        .method(
            MethodDef::builder("setBar").param("int").handler(|t, args| {
                downcast_foo(t)?.bar.store(args[0].as_i32()?, Ordering::SeqCst);
                Ok(Value::Null)
            }),
        )
        .method(
            MethodDef::builder("addAll").param("long[]").returns("long").handler(
                |_, args| {
                    let mut sum = 0i64;
                    for item in args[0].as_list()? {
                        sum += item.as_i64()?;
                    }
                    Ok(Value::I64(sum))
                },
            ),
        )
        .build()
}

fn foo(bar: i32) -> Foo {
    Foo {
        class: ClassDef::builder("acme::Foo")
            .public()
            .implements(foo_mbean())
            .build(),
        bar: AtomicI32::new(bar),
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_foo_scenario_invoke() {
    let introspector = Introspector::new();
    let bean = foo(5);

    let value = introspector.invoke(&bean, "getBar", &[], &[]).unwrap();
    assert_eq!(value.as_i32().unwrap(), 5);

    introspector
        .invoke(&bean, "setBar", &["int"], &[Value::I32(9)])
        .unwrap();
    let value = introspector.invoke(&bean, "getBar", &[], &[]).unwrap();
    assert_eq!(value.as_i32().unwrap(), 9);
}

#[test]
fn test_specialized_and_generic_agree() {
    let iface = foo_mbean();
    let bean = foo(4);
    let specialized = SpecializedInvoker::generate(&iface);
    let generic = GenericInvoker::new();

    let args = [Value::List(vec![Value::I64(1), Value::I64(2), Value::I64(3)])];
    let a = specialized.invoke(&bean, "addAll", &["long[]"], &args).unwrap();
    let b = generic.invoke(&bean, "addAll", &["long[]"], &args).unwrap();
    assert_eq!(a.as_i64().unwrap(), 6);
    assert_eq!(b.as_i64().unwrap(), 6);
}

#[test]
fn test_subtype_argument_falls_back_without_cast_error() {
    // The compiled cast expects exactly `acme::Base`; the caller hands an
    // opaque tagged with a subtype name. The call must either succeed via
    // the generic path or report the target's own failure, never a raw
    // cast error.
    struct Payload {
        weight: i64,
    }

    struct Scale {
        class: Arc<ClassDef>,
    }
    impl Managed for Scale {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn class(&self) -> Arc<ClassDef> {
            Arc::clone(&self.class)
        }
    }

    let iface = ClassDef::builder("acme::ScaleMBean")
        .public()
        .interface()
        .method(
            MethodDef::builder("weigh")
                .param("acme::Base")
                .returns("long")
                .handler(|_, args| {
                    let payload = args[0].downcast_ref::<Payload>("acme::Base")?;
                    Ok(Value::I64(payload.weight))
                }),
        )
        .build();
    let bean = Scale {
        class: ClassDef::builder("acme::Scale")
            .public()
            .implements(Arc::clone(&iface))
            .build(),
    };

    let introspector = Introspector::new();
    let arg = Value::opaque("acme::Derived", Payload { weight: 12 });
    match introspector.invoke(&bean, "weigh", &["acme::Base"], &[arg]) {
        Ok(value) => assert_eq!(value.as_i64().unwrap(), 12),
        Err(InvokeError::TargetError { .. }) => {}
        Err(other) => panic!("cast failure leaked to the caller: {other:?}"),
    }
}

#[test]
fn test_target_raise_carries_cause() {
    let iface = ClassDef::builder("acme::JobMBean")
        .public()
        .interface()
        .method(MethodDef::builder("run").handler(|_, _| {
            Err(CallError::Raised("job exploded".into()))
        }))
        .build();
    struct Job {
        class: Arc<ClassDef>,
    }
    impl Managed for Job {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn class(&self) -> Arc<ClassDef> {
            Arc::clone(&self.class)
        }
    }
    let bean = Job {
        class: ClassDef::builder("acme::Job")
            .public()
            .implements(iface)
            .build(),
    };

    let err = Introspector::new().invoke(&bean, "run", &[], &[]).unwrap_err();
    match err {
        InvokeError::TargetError { name, source } => {
            assert_eq!(name, "run");
            assert_eq!(source.to_string(), "target raised: job exploded");
        }
        other => panic!("expected TargetError, got {other:?}"),
    }
}

#[test]
fn test_empty_operation_name_is_rejected() {
    let bean = foo(0);
    let err = Introspector::new().invoke(&bean, "", &[], &[]).unwrap_err();
    assert!(matches!(err, InvokeError::BadArgument(_)));
}

#[test]
fn test_custom_invoker_overrides_builtins() {
    struct Fixed;
    impl InvokeStrategy for Fixed {
        fn invoke(
            &self,
            _target: &dyn Managed,
            _name: &str,
            _signature: &[&str],
            _args: &[Value],
        ) -> Result<Value, InvokeError> {
            Ok(Value::Str("intercepted".into()))
        }
    }

    let introspector =
        Introspector::with_config(IntrospectorConfig::new().custom_invoker(Arc::new(Fixed)));
    let bean = foo(5);

    let value = introspector.invoke(&bean, "getBar", &[], &[]).unwrap();
    assert_eq!(value.as_str().unwrap(), "intercepted");
}

// ============================================================================
// Cache retention
// ============================================================================

#[test]
fn test_invoker_cached_per_interface() {
    let introspector = Introspector::new();
    let iface = foo_mbean();

    let first = introspector.invoker_for(&iface);
    let second = introspector.invoker_for(&iface);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_dead_types_do_not_accumulate_in_caches() {
    let introspector = Introspector::new();

    for i in 0..1000 {
        let iface = ClassDef::builder(format!("acme::T{i}MBean"))
            .public()
            .interface()
            .method(
                MethodDef::builder("getN").returns("int").handler(|_, _| Ok(Value::I32(0))),
            )
            .build();
        let bean = Foo {
            class: ClassDef::builder(format!("acme::T{i}"))
                .public()
                .implements(Arc::clone(&iface))
                .build(),
            bar: AtomicI32::new(0),
        };

        assert!(introspector.descriptor_for(&bean).is_some());
        introspector.invoker_for(&iface);
        // Interface and class drop here; both cache keys die.
    }

    // A handful of dead slots may linger until the next insert, but nothing
    // close to the thousand types that went through.
    assert!(introspector.descriptor_cache().sweep() <= 1);
    assert!(introspector.invoker_cache().sweep() <= 1);

    // A still-referenced type keeps its entries.
    let bean = foo(1);
    let iface = bean.class().interfaces()[0].clone();
    introspector.descriptor_for(&bean).unwrap();
    introspector.invoker_for(&iface);
    assert_eq!(introspector.descriptor_cache().sweep(), 1);
    assert_eq!(introspector.invoker_cache().sweep(), 1);
}
