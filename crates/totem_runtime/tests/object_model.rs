//! Integration tests for the `totem_runtime` object model.
//!
//! These lock in the behavior contract shared with the embedded rendition:
//! guard ordering, denial wording, enum membership, dispatch, and pipelines.

use std::cell::RefCell;
use std::rc::Rc;

use totem_runtime::{
    DATA_POINTER, FieldSpec, FuncValue, GuardError, MatchTable, RecordingSink, Runtime, TypeDescriptor, Value,
    Visibility,
};

fn recording_runtime() -> (Runtime, Rc<RecordingSink>) {
    let sink = Rc::new(RecordingSink::new());
    let runtime = Runtime::with_sink(Rc::clone(&sink));
    (runtime, sink)
}

#[test]
/// The constructor runs against the private view, so it can seed fields that
/// are not publicly writable.
fn ctor_runs_against_the_private_view() {
    let (runtime, sink) = recording_runtime();
    let point = runtime.define_type(
        TypeDescriptor::builder("Point")
            .field(FieldSpec::new("x"))
            .field(FieldSpec::new("y"))
            .ctor(|this, args| {
                this.set("x", args.first().cloned().unwrap_or(Value::Null));
                this.set("y", args.get(1).cloned().unwrap_or(Value::Null));
            })
            .build(),
    );
    let p = point.construct(&[Value::number(3.0), Value::number(4.0)]);
    assert_eq!(p.try_get("x"), Ok(Value::number(3.0)));
    assert_eq!(p.try_get("y"), Ok(Value::number(4.0)));
    assert!(sink.lines().is_empty());
}

#[test]
fn default_visibility_guards_public_writes() {
    let (runtime, sink) = recording_runtime();
    let ty = runtime.define_type(
        TypeDescriptor::builder("Box")
            .field(FieldSpec::new("contents").initial(Value::str("empty")))
            .build(),
    );
    let b = ty.construct(&[]);
    assert_eq!(b.get("contents"), Value::str("empty"));
    assert!(!b.set("contents", Value::str("full")));
    assert_eq!(b.get("contents"), Value::str("empty"));
    assert_eq!(sink.lines(), vec!["[ERR] Box.contents is not writable"]);
}

#[test]
fn typecheck_gates_the_write_and_preserves_storage() {
    let (runtime, sink) = recording_runtime();
    let ty = runtime.define_type(
        TypeDescriptor::builder("Meter")
            .field(
                FieldSpec::new("level")
                    .writable(Visibility::Public)
                    .initial(Value::number(0.0))
                    .typecheck(|_, value| matches!(value, Value::Number(_))),
            )
            .build(),
    );
    let m = ty.construct(&[]);
    assert!(m.set("level", Value::number(5.0)));
    assert!(!m.set("level", Value::str("high")));
    assert_eq!(m.get("level"), Value::number(5.0));
    assert_eq!(sink.lines(), vec!["[ERR] Meter.level typecheck failed"]);
}

#[test]
/// A rejecting write hook denies before the typecheck is consulted.
fn write_hook_runs_before_the_typecheck() {
    let order = Rc::new(RefCell::new(Vec::<&str>::new()));
    let hook_order = Rc::clone(&order);
    let check_order = Rc::clone(&order);

    let (runtime, _) = recording_runtime();
    let ty = runtime.define_type(
        TypeDescriptor::builder("Gate")
            .field(
                FieldSpec::new("value")
                    .writable(Visibility::Public)
                    .on_write(move |_, _| {
                        hook_order.borrow_mut().push("hook");
                        false
                    })
                    .typecheck(move |_, _| {
                        check_order.borrow_mut().push("typecheck");
                        true
                    }),
            )
            .build(),
    );
    let g = ty.construct(&[]);
    assert!(matches!(
        g.try_set("value", Value::number(1.0)),
        Err(GuardError::RejectedWrite { .. })
    ));
    assert_eq!(*order.borrow(), vec!["hook"]);
}

#[test]
fn read_hook_transforms_public_reads_only() {
    let (runtime, _) = recording_runtime();
    let ty = runtime.define_type(
        TypeDescriptor::builder("Badge")
            .field(
                FieldSpec::new("name")
                    .initial(Value::str("ada"))
                    .on_read(|_, value| Value::str(value.to_string().to_uppercase())),
            )
            .method("raw", |this, _| this.get("name"))
            .build(),
    );
    let badge = ty.construct(&[]);
    assert_eq!(badge.get("name"), Value::str("ADA"));
    assert_eq!(badge.call("raw", &[]), Value::str("ada"));
}

#[test]
fn private_methods_resolve_only_through_the_private_view() {
    let (runtime, sink) = recording_runtime();
    let ty = runtime.define_type(
        TypeDescriptor::builder("Vault")
            .private_method("secret", |_, _| Value::number(7.0))
            .method("reveal", |this, _| this.call("secret", &[]))
            .build(),
    );
    let vault = ty.construct(&[]);
    assert_eq!(vault.call("reveal", &[]), Value::number(7.0));
    assert!(matches!(vault.try_get("secret"), Err(GuardError::PrivateMethod { .. })));
    assert!(matches!(
        vault.try_set("reveal", Value::Null),
        Err(GuardError::MethodNotAssignable { .. })
    ));
    assert_eq!(vault.get("secret"), Value::Undefined);
    assert_eq!(sink.lines(), vec!["[ERR] Vault.secret is a private method"]);
}

#[test]
fn unknown_members_are_refused_with_the_member_name() {
    let (runtime, sink) = recording_runtime();
    let ty = runtime.define_type(TypeDescriptor::builder("Thing").build());
    let t = ty.construct(&[]);
    let err = t.try_get("ghost").unwrap_err();
    assert_eq!(err, GuardError::UnknownMember {
        type_name: "Thing".to_string(),
        member: "ghost".to_string(),
    });
    assert_eq!(t.get("ghost"), Value::Undefined);
    assert_eq!(sink.lines(), vec!["[ERR] Thing.ghost does not exist"]);
}

#[test]
fn data_pointer_reads_are_internal() {
    let (runtime, _) = recording_runtime();
    let ty = runtime.define_type(TypeDescriptor::builder("Tag").build());
    let t = ty.construct(&[]);
    assert!(matches!(t.try_get(DATA_POINTER), Err(GuardError::InternalMember { .. })));
    assert_eq!(t.type_name(), "Tag");
}

#[test]
fn bound_methods_share_instance_storage() {
    let (runtime, _) = recording_runtime();
    let ty = runtime.define_type(
        TypeDescriptor::builder("Counter")
            .field(FieldSpec::new("count").initial(Value::number(0.0)))
            .method("bump", |this, _| {
                let next = match this.get("count") {
                    Value::Number(n) => n + 1.0,
                    _ => 1.0,
                };
                this.set("count", Value::number(next));
                Value::Undefined
            })
            .build(),
    );
    let counter = ty.construct(&[]);
    let bump = counter.try_get("bump").unwrap();
    match bump {
        Value::Function(f) => {
            f.call(&[]);
            f.call(&[]);
        }
        other => panic!("expected a bound method, got {other:?}"),
    }
    assert_eq!(counter.get("count"), Value::number(2.0));
}

#[test]
fn instances_compare_by_storage_identity() {
    let (runtime, _) = recording_runtime();
    let ty = runtime.define_type(TypeDescriptor::builder("Unit").build());
    let a = ty.construct(&[]);
    let b = ty.construct(&[]);
    assert_eq!(Value::Object(a.clone()), Value::Object(a.clone()));
    assert_ne!(Value::Object(a), Value::Object(b));
}

#[test]
fn dispatch_prefers_exact_keys_then_patterns_then_fallback() {
    let runtime = Runtime::new();
    let table = MatchTable::new()
        .entry("a", Value::number(1.0))
        .entry("/^b/", Value::number(2.0))
        .entry("_", Value::number(0.0));
    assert_eq!(runtime.match_value(&Value::str("a"), &table), Value::number(1.0));
    assert_eq!(runtime.match_value(&Value::str("bat"), &table), Value::number(2.0));
    assert_eq!(runtime.match_value(&Value::str("zzz"), &table), Value::number(0.0));
}

#[test]
/// A falsy stage abstains: the next stage sees the untouched value. A truthy
/// stage replaces it.
fn pipeline_stages_see_the_running_value() {
    let runtime = Runtime::new();
    let seen = Rc::new(RefCell::new(Vec::<Value>::new()));

    let record = {
        let seen = Rc::clone(&seen);
        FuncValue::new(move |args| {
            seen.borrow_mut().push(args.first().cloned().unwrap_or(Value::Undefined));
            Value::Bool(false)
        })
    };
    let abstaining = FuncValue::new(|_| Value::Bool(false));
    runtime.pipeline(vec![abstaining, record.clone()]).call(&[Value::str("v")]);

    let replacing = FuncValue::new(|_| Value::str("fv"));
    runtime.pipeline(vec![replacing, record]).call(&[Value::str("v")]);

    assert_eq!(*seen.borrow(), vec![Value::str("v"), Value::str("fv")]);
}

#[test]
fn embedded_rendition_declares_the_api_object() {
    assert!(totem_runtime::JS_SOURCE.starts_with("const _o"));
    for service in ["$DataPointer", "$Log", "$Enum", "$Type", "$Match", "$Pipeline"] {
        assert!(
            totem_runtime::JS_SOURCE.contains(service),
            "embedded runtime is missing {service}"
        );
    }
    assert!(totem_runtime::JS_SOURCE.ends_with('\n'));
}
