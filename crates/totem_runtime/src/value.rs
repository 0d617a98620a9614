//! Dynamic values flowing through the Totem object runtime.
//!
//! `Value` mirrors the value model of the emitted programs: a small set of
//! primitives plus reference-counted arrays, functions, enum sets, and object
//! instances. Coercions follow the target language so that dispatch keys and
//! log lines render identically on both sides of the runtime.
//!
//! ## Notes
//! - Equality is reference identity for arrays, functions, enum sets, and
//!   instances; structural for primitives. `NaN` never equals itself.
//! - `Display` is the string coercion used for dispatch keys and logging.
//!
//! ## Examples
//! ```rust
//! use totem_runtime::Value;
//!
//! assert_eq!(Value::number(3.0).to_string(), "3");
//! assert_eq!(Value::number(0.5).to_string(), "0.5");
//! assert!(!Value::str("").truthy());
//! assert!(Value::array(vec![]).truthy());
//! ```

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use crate::enums::EnumSet;
use crate::object::Instance;

/// Shared, interiorly mutable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(ArrayRef),
    Function(FuncValue),
    Enum(EnumSet),
    Object(Instance),
}

impl Value {
    /// Construct a string value.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Construct a numeric value.
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Construct a shared array value.
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Construct a function value from a closure.
    pub fn function(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Function(FuncValue::new(f))
    }

    /// Report truthiness under the target language's rules.
    ///
    /// `undefined`, `null`, `false`, `0`, `NaN`, and the empty string are
    /// falsy; every reference value is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Function(_) | Value::Enum(_) | Value::Object(_) => true,
        }
    }

    /// Classify the value the way the target language's `typeof` does.
    ///
    /// ## Notes
    /// - `null`, arrays, enum sets, and instances all report `"object"`.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::Null | Value::Array(_) | Value::Enum(_) | Value::Object(_) => "object",
        }
    }

    /// Return the declared type name when the value is an object instance.
    pub fn instance_type(&self) -> Option<&str> {
        match self {
            Value::Object(instance) => Some(instance.type_name()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => {
                let items = items.borrow();
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    // Array coercion renders holes and nulls as nothing.
                    match item {
                        Value::Undefined | Value::Null => {}
                        other => write!(f, "{other}")?,
                    }
                }
                Ok(())
            }
            Value::Function(_) => f.write_str("[function]"),
            Value::Enum(_) | Value::Object(_) => f.write_str("[object Object]"),
        }
    }
}

// Integer-valued doubles render without a decimal point, matching the target
// language up to the contiguous integer range.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == n.trunc() && n.abs() < 9_007_199_254_740_992.0 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

/// A callable runtime value.
///
/// Functions are reference-counted closures over `&[Value]`; bound methods and
/// pipeline stages are both represented this way.
#[derive(Clone)]
pub struct FuncValue(Rc<dyn Fn(&[Value]) -> Value>);

impl FuncValue {
    /// Wrap a closure as a callable value.
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl PartialEq for FuncValue {
    fn eq(&self, other: &Self) -> bool {
        // Identity compares the data pointer only, never the vtable.
        std::ptr::eq(Rc::as_ptr(&self.0) as *const (), Rc::as_ptr(&other.0) as *const ())
    }
}

impl fmt::Debug for FuncValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FuncValue(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_target_coercions() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::number(42.0).to_string(), "42");
        assert_eq!(Value::number(-0.0).to_string(), "0");
        assert_eq!(Value::number(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::str("plain").to_string(), "plain");
        let nested = Value::array(vec![
            Value::number(1.0),
            Value::Null,
            Value::array(vec![Value::number(2.0), Value::number(3.0)]),
        ]);
        assert_eq!(nested.to_string(), "1,,2,3");
    }

    #[test]
    fn truthiness_follows_target_rules() {
        assert!(!Value::Undefined.truthy());
        assert!(!Value::Null.truthy());
        assert!(!Value::number(0.0).truthy());
        assert!(!Value::number(f64::NAN).truthy());
        assert!(!Value::str("").truthy());
        assert!(Value::str("0").truthy());
        assert!(Value::array(vec![]).truthy());
        assert!(Value::function(|_| Value::Undefined).truthy());
    }

    #[test]
    fn equality_is_identity_for_reference_values() {
        let shared = Value::array(vec![Value::number(1.0)]);
        assert_eq!(shared, shared.clone());
        assert_ne!(shared, Value::array(vec![Value::number(1.0)]));

        let f = Value::function(|_| Value::Null);
        assert_eq!(f, f.clone());
        assert_ne!(f, Value::function(|_| Value::Null));

        assert_ne!(Value::number(f64::NAN), Value::number(f64::NAN));
        assert_eq!(Value::number(0.0), Value::number(-0.0));
    }
}
