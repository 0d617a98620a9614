//! Object types, guarded instances, and private views.
//!
//! A [`TypeDescriptor`] declares fields (with per-field read/write visibility,
//! an initial value, and optional typecheck and hooks), methods, and an
//! optional constructor. [`Type::construct`] allocates storage and returns the
//! public [`Instance`] view; method handlers and hooks receive the unrestricted
//! [`PrivateView`] over the same storage.
//!
//! ## Notes
//! - Public access is guarded: every denial is a typed [`GuardError`], and the
//!   lenient accessors log it and carry on the way hosted programs do.
//! - The write path runs the write hook before the typecheck; a value must
//!   pass both before storage changes.
//!
//! ## Examples
//! ```rust
//! use totem_runtime::{FieldSpec, Runtime, TypeDescriptor, Value, Visibility};
//!
//! let runtime = Runtime::new();
//! let point = runtime.define_type(
//!     TypeDescriptor::builder("Point")
//!         .field(FieldSpec::new("x").writable(Visibility::Public).initial(Value::number(0.0)))
//!         .method("describe", |this, _args| Value::str(format!("x={}", this.get("x"))))
//!         .build(),
//! );
//! let p = point.construct(&[]);
//! assert!(p.set("x", Value::number(3.0)));
//! assert_eq!(p.call("describe", &[]).to_string(), "x=3");
//! ```

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::GuardError;
use crate::log::Log;
use crate::value::Value;

/// Property key carrying an instance's type tag in emitted programs.
///
/// The tag is how emitted typechecks recognize instances; on the Rust side the
/// same information is [`Instance::type_name`], and the key itself is an
/// internal name the public view refuses to serve.
pub const DATA_POINTER: &str = "$DataPointer";

// Native object-protocol names the public view never serves.
const NATIVE_MEMBERS: [&str; 3] = ["constructor", "prototype", "__proto__"];

/// Read or write visibility of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Per-field typecheck; refusing the value denies the write.
pub type Validator = Rc<dyn Fn(&PrivateView, &Value) -> bool>;
/// Transform applied to a field value on public reads.
pub type ReadHook = Rc<dyn Fn(&PrivateView, Value) -> Value>;
/// Gate consulted before a public write; refusing denies it.
pub type WriteHook = Rc<dyn Fn(&PrivateView, &Value) -> bool>;
/// Method body, invoked with the private view and the call arguments.
pub type Handler = Rc<dyn Fn(&PrivateView, &[Value]) -> Value>;
/// Constructor body, invoked with the private view and the construction arguments.
pub type Ctor = Rc<dyn Fn(&PrivateView, &[Value])>;

// ============================================================================
// Descriptors
// ============================================================================

/// Declaration of a single field.
///
/// Defaults match the emitted descriptors: publicly readable, privately
/// writable, initialized to `null`, no typecheck, no hooks.
pub struct FieldSpec {
    name: String,
    get: Visibility,
    set: Visibility,
    initial: Value,
    typecheck: Option<Validator>,
    on_read: Option<ReadHook>,
    on_write: Option<WriteHook>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            get: Visibility::Public,
            set: Visibility::Private,
            initial: Value::Null,
            typecheck: None,
            on_read: None,
            on_write: None,
        }
    }

    /// Set the read visibility.
    pub fn readable(mut self, visibility: Visibility) -> Self {
        self.get = visibility;
        self
    }

    /// Set the write visibility.
    pub fn writable(mut self, visibility: Visibility) -> Self {
        self.set = visibility;
        self
    }

    /// Set the initial value.
    pub fn initial(mut self, value: Value) -> Self {
        self.initial = value;
        self
    }

    /// Attach a typecheck consulted on public writes.
    pub fn typecheck(mut self, check: impl Fn(&PrivateView, &Value) -> bool + 'static) -> Self {
        self.typecheck = Some(Rc::new(check));
        self
    }

    /// Attach a transform applied on public reads.
    pub fn on_read(mut self, hook: impl Fn(&PrivateView, Value) -> Value + 'static) -> Self {
        self.on_read = Some(Rc::new(hook));
        self
    }

    /// Attach a gate consulted before public writes.
    pub fn on_write(mut self, hook: impl Fn(&PrivateView, &Value) -> bool + 'static) -> Self {
        self.on_write = Some(Rc::new(hook));
        self
    }
}

struct MethodSpec {
    name: String,
    private: bool,
    handler: Handler,
}

/// Declaration of an object type: name, fields, methods, constructor.
pub struct TypeDescriptor {
    name: String,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
    ctor: Option<Ctor>,
}

impl TypeDescriptor {
    /// Start building a descriptor for the named type.
    pub fn builder(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder {
            inner: TypeDescriptor {
                name: name.into(),
                fields: Vec::new(),
                methods: Vec::new(),
                ctor: None,
            },
        }
    }

    /// Return the declared type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    fn method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|method| method.name == name)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Builder for [`TypeDescriptor`], consumed by [`TypeBuilder::build`].
pub struct TypeBuilder {
    inner: TypeDescriptor,
}

impl TypeBuilder {
    /// Declare a field. Declaration order is enumeration order.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.inner.fields.push(spec);
        self
    }

    /// Declare a public method.
    pub fn method(mut self, name: impl Into<String>, handler: impl Fn(&PrivateView, &[Value]) -> Value + 'static) -> Self {
        self.inner.methods.push(MethodSpec {
            name: name.into(),
            private: false,
            handler: Rc::new(handler),
        });
        self
    }

    /// Declare a private method, callable only through the private view.
    pub fn private_method(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&PrivateView, &[Value]) -> Value + 'static,
    ) -> Self {
        self.inner.methods.push(MethodSpec {
            name: name.into(),
            private: true,
            handler: Rc::new(handler),
        });
        self
    }

    /// Declare the constructor, run against the private view at construction.
    pub fn ctor(mut self, ctor: impl Fn(&PrivateView, &[Value]) + 'static) -> Self {
        self.inner.ctor = Some(Rc::new(ctor));
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.inner
    }
}

// ============================================================================
// Types and instances
// ============================================================================

/// A defined object type, ready to construct instances.
///
/// Obtained from [`Runtime::define_type`](crate::Runtime::define_type), which
/// binds the runtime's log so guard denials surface through it.
#[derive(Clone)]
pub struct Type {
    descriptor: Rc<TypeDescriptor>,
    log: Log,
}

impl Type {
    pub fn new(descriptor: TypeDescriptor, log: Log) -> Self {
        Self {
            descriptor: Rc::new(descriptor),
            log,
        }
    }

    /// Return the declared type name.
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Construct an instance: allocate per-field storage from the declared
    /// initial values, run the constructor against the private view, and
    /// return the public view.
    pub fn construct(&self, args: &[Value]) -> Instance {
        let storage = self
            .descriptor
            .fields
            .iter()
            .map(|field| field.initial.clone())
            .collect::<Vec<_>>();
        let private = PrivateView {
            descriptor: Rc::clone(&self.descriptor),
            storage: Rc::new(RefCell::new(storage)),
            log: self.log.clone(),
        };
        if let Some(ctor) = &self.descriptor.ctor {
            (**ctor)(&private, args);
        }
        private.public()
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type").field("name", &self.name()).finish_non_exhaustive()
    }
}

/// The public, guarded view of an instance.
///
/// Cloning shares the underlying storage; equality is storage identity.
#[derive(Clone)]
pub struct Instance {
    descriptor: Rc<TypeDescriptor>,
    storage: Rc<RefCell<Vec<Value>>>,
    log: Log,
}

impl Instance {
    /// Return the declared type name.
    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    /// Read a member, or explain why it was refused.
    ///
    /// Methods resolve before fields and come back bound to the private view.
    pub fn try_get(&self, name: &str) -> Result<Value, GuardError> {
        if is_internal(name) {
            return Err(GuardError::InternalMember {
                type_name: self.type_name().to_string(),
                member: name.to_string(),
            });
        }
        if let Some(method) = self.descriptor.method(name) {
            if method.private {
                return Err(GuardError::PrivateMethod {
                    type_name: self.type_name().to_string(),
                    member: name.to_string(),
                });
            }
            return Ok(self.bind(method));
        }
        let Some(index) = self.descriptor.field_index(name) else {
            return Err(GuardError::UnknownMember {
                type_name: self.type_name().to_string(),
                member: name.to_string(),
            });
        };
        let spec = &self.descriptor.fields[index];
        if spec.get != Visibility::Public {
            return Err(GuardError::PrivateRead {
                type_name: self.type_name().to_string(),
                member: name.to_string(),
            });
        }
        let value = self.storage.borrow()[index].clone();
        match &spec.on_read {
            Some(hook) => Ok((**hook)(&self.private(), value)),
            None => Ok(value),
        }
    }

    /// Write a member, or explain why it was refused.
    ///
    /// Storage is untouched unless the write hook and the typecheck both
    /// accept the value.
    pub fn try_set(&self, name: &str, value: Value) -> Result<(), GuardError> {
        if is_internal(name) {
            return Err(GuardError::InternalMember {
                type_name: self.type_name().to_string(),
                member: name.to_string(),
            });
        }
        if self.descriptor.method(name).is_some() {
            return Err(GuardError::MethodNotAssignable {
                type_name: self.type_name().to_string(),
                member: name.to_string(),
            });
        }
        let Some(index) = self.descriptor.field_index(name) else {
            return Err(GuardError::UnknownMember {
                type_name: self.type_name().to_string(),
                member: name.to_string(),
            });
        };
        let spec = &self.descriptor.fields[index];
        if spec.set != Visibility::Public {
            return Err(GuardError::PrivateWrite {
                type_name: self.type_name().to_string(),
                member: name.to_string(),
            });
        }
        if let Some(hook) = &spec.on_write {
            if !(**hook)(&self.private(), &value) {
                return Err(GuardError::RejectedWrite {
                    type_name: self.type_name().to_string(),
                    member: name.to_string(),
                });
            }
        }
        if let Some(check) = &spec.typecheck {
            if !(**check)(&self.private(), &value) {
                return Err(GuardError::FailedTypecheck {
                    type_name: self.type_name().to_string(),
                    member: name.to_string(),
                });
            }
        }
        self.storage.borrow_mut()[index] = value;
        Ok(())
    }

    /// Read a member the way hosted programs do: denials are logged at error
    /// level and read as `undefined`.
    pub fn get(&self, name: &str) -> Value {
        match self.try_get(name) {
            Ok(value) => value,
            Err(err) => {
                self.log.err(&[Value::str(err.to_string())]);
                Value::Undefined
            }
        }
    }

    /// Write a member the way hosted programs do: denials are logged at error
    /// level and report `false`.
    pub fn set(&self, name: &str, value: Value) -> bool {
        match self.try_set(name, value) {
            Ok(()) => true,
            Err(err) => {
                self.log.err(&[Value::str(err.to_string())]);
                false
            }
        }
    }

    /// Invoke a member; non-callable or refused members yield `undefined`.
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        match self.get(name) {
            Value::Function(f) => f.call(args),
            _ => Value::Undefined,
        }
    }

    /// Enumerate the public surface: publicly readable fields, then public
    /// methods, in declaration order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for field in &self.descriptor.fields {
            if field.get == Visibility::Public {
                keys.push(field.name.clone());
            }
        }
        for method in &self.descriptor.methods {
            if !method.private {
                keys.push(method.name.clone());
            }
        }
        keys
    }

    fn bind(&self, method: &MethodSpec) -> Value {
        let private = self.private();
        let handler = Rc::clone(&method.handler);
        Value::function(move |args| (*handler)(&private, args))
    }

    fn private(&self) -> PrivateView {
        PrivateView {
            descriptor: Rc::clone(&self.descriptor),
            storage: Rc::clone(&self.storage),
            log: self.log.clone(),
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance").field("type", &self.type_name()).finish_non_exhaustive()
    }
}

/// The unrestricted view handlers and hooks run against.
///
/// Reads and writes bypass visibility, hooks, and typechecks; the storage
/// shape itself is fixed, so writes to undeclared names report `false`.
#[derive(Clone)]
pub struct PrivateView {
    descriptor: Rc<TypeDescriptor>,
    storage: Rc<RefCell<Vec<Value>>>,
    log: Log,
}

impl PrivateView {
    /// Return the declared type name.
    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    /// Read a field (raw storage) or a method (bound, privacy ignored).
    pub fn get(&self, name: &str) -> Value {
        if let Some(index) = self.descriptor.field_index(name) {
            return self.storage.borrow()[index].clone();
        }
        if let Some(method) = self.descriptor.method(name) {
            let handler = Rc::clone(&method.handler);
            let private = self.clone();
            return Value::function(move |args| (*handler)(&private, args));
        }
        Value::Undefined
    }

    /// Write a field directly, skipping every guard.
    pub fn set(&self, name: &str, value: Value) -> bool {
        match self.descriptor.field_index(name) {
            Some(index) => {
                self.storage.borrow_mut()[index] = value;
                true
            }
            None => false,
        }
    }

    /// Invoke a method regardless of privacy.
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        match self.descriptor.method(name) {
            Some(method) => (*method.handler)(self, args),
            None => Value::Undefined,
        }
    }

    /// Return the log bound to this instance.
    pub fn log(&self) -> &Log {
        &self.log
    }

    /// Return the guarded public view over the same storage.
    pub fn public(&self) -> Instance {
        Instance {
            descriptor: Rc::clone(&self.descriptor),
            storage: Rc::clone(&self.storage),
            log: self.log.clone(),
        }
    }
}

impl fmt::Debug for PrivateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateView").field("type", &self.type_name()).finish_non_exhaustive()
    }
}

fn is_internal(name: &str) -> bool {
    name == DATA_POINTER || NATIVE_MEMBERS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Log {
        Log::with_sink(crate::log::RecordingSink::new())
    }

    #[test]
    fn field_defaults_are_readable_not_writable() {
        let ty = Type::new(
            TypeDescriptor::builder("Box").field(FieldSpec::new("contents")).build(),
            quiet(),
        );
        let b = ty.construct(&[]);
        assert_eq!(b.try_get("contents"), Ok(Value::Null));
        assert!(matches!(
            b.try_set("contents", Value::number(1.0)),
            Err(GuardError::PrivateWrite { .. })
        ));
    }

    #[test]
    fn keys_list_public_members_in_declaration_order() {
        let ty = Type::new(
            TypeDescriptor::builder("Account")
                .field(FieldSpec::new("owner"))
                .field(FieldSpec::new("pin").readable(Visibility::Private))
                .method("deposit", |_, _| Value::Undefined)
                .private_method("audit", |_, _| Value::Undefined)
                .build(),
            quiet(),
        );
        assert_eq!(ty.construct(&[]).keys(), vec!["owner", "deposit"]);
    }

    #[test]
    fn internal_names_are_refused() {
        let ty = Type::new(TypeDescriptor::builder("Plain").build(), quiet());
        let p = ty.construct(&[]);
        for name in [DATA_POINTER, "constructor", "prototype", "__proto__"] {
            assert!(matches!(p.try_get(name), Err(GuardError::InternalMember { .. })));
        }
    }
}
