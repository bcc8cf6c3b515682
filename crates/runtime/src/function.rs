use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type Body = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A function value
///
/// Renders as its type name. Two function values are equal only when they
/// share the same closure.
#[derive(Clone)]
pub struct Function {
    type_name: Arc<str>,
    body: Arc<Body>,
}

impl Function {
    pub fn new(
        type_name: impl Into<Arc<str>>,
        body: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Function {
        Function {
            type_name: type_name.into(),
            body: Arc::new(body),
        }
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dafny_core::Int;

    #[test]
    fn test_call_and_identity() {
        let inc = Function::new("int -> int", |args: &[Value]| match args {
            [Value::Int(n)] => Value::Int(n.plus(&Int::one())),
            _ => Value::Null,
        });
        assert_eq!(inc.call(&[Value::Int(Int::one())]), Value::Int(Int::two()));
        assert!(inc.ptr_eq(&inc.clone()));

        let other = Function::new("int -> int", |_: &[Value]| Value::Null);
        assert!(!inc.ptr_eq(&other));
        assert_eq!(inc.type_name(), "int -> int");
    }
}
