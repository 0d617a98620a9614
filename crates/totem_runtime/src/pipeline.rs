//! Function pipelines with falsy abstention.
//!
//! A pipeline folds a value through its stages in order. A stage that returns
//! a truthy value replaces the running value; a falsy return abstains and the
//! running value passes through unchanged.
//!
//! ## Examples
//! ```rust
//! use totem_runtime::{pipeline, FuncValue, Value};
//!
//! let double = FuncValue::new(|args| match args.first() {
//!     Some(Value::Number(n)) => Value::number(n * 2.0),
//!     _ => Value::Undefined,
//! });
//! let abstain = FuncValue::new(|_| Value::Undefined);
//! let run = pipeline(vec![abstain, double.clone(), double]);
//! assert_eq!(run.call(&[Value::number(3.0)]), Value::number(12.0));
//! ```

use crate::value::{FuncValue, Value};

/// Compose stages into a single callable.
///
/// The seed is the call's first argument, `undefined` when absent.
pub fn pipeline(stages: Vec<FuncValue>) -> FuncValue {
    FuncValue::new(move |args| {
        let mut current = args.first().cloned().unwrap_or(Value::Undefined);
        for stage in &stages {
            let out = stage.call(std::slice::from_ref(&current));
            if out.truthy() {
                current = out;
            }
        }
        current
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(tag: &'static str) -> FuncValue {
        FuncValue::new(move |args| match args.first() {
            Some(Value::Str(s)) => Value::str(format!("{s}{tag}")),
            _ => Value::Undefined,
        })
    }

    #[test]
    fn stages_apply_in_order() {
        let run = pipeline(vec![suffix("-a"), suffix("-b")]);
        assert_eq!(run.call(&[Value::str("x")]), Value::str("x-a-b"));
    }

    #[test]
    fn falsy_stages_abstain() {
        let drop_all = FuncValue::new(|_| Value::Bool(false));
        let run = pipeline(vec![drop_all, suffix("-kept")]);
        assert_eq!(run.call(&[Value::str("x")]), Value::str("x-kept"));
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let run = pipeline(Vec::new());
        assert_eq!(run.call(&[Value::number(7.0)]), Value::number(7.0));
        assert_eq!(run.call(&[]), Value::Undefined);
    }
}
