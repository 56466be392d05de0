use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::strategy::StubbingStrategy;
use crate::strategies::unwrap_wildcards;
use crate::types::Type;
use crate::value::Value;

/// Produces the same value for exactly one type
pub struct ConstantValueStrategy {
    ty: Type,
    value: Value,
}

impl ConstantValueStrategy {
    pub fn new(ty: Type, value: Value) -> Self {
        Self { ty, value }
    }
}

impl StubbingStrategy for ConstantValueStrategy {
    fn accepts(&self, _context: &StubbingContext, ty: &Type) -> bool {
        unwrap_wildcards(ty).is_some_and(|ty| ty == self.ty)
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        if !self.accepts(context, ty) {
            return Err(Error::unresolvable(ty, context.site()));
        }
        Ok(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::fixtures::root_context;
    use crate::strategies::{common_constant_values, constant, constant_value};
    use crate::types::{Class, WildcardType};

    #[test]
    fn test_accepts_only_its_type() {
        let context = root_context();
        let strategy = constant(42i32);
        assert!(strategy.accepts(&context, &Type::Class(Class::of::<i32>())));
        assert!(!strategy.accepts(&context, &Type::Class(Class::of::<i64>())));
        assert!(strategy.accepts(&context, &Type::Wildcard(WildcardType::extends(Class::of::<i32>()))));
    }

    #[test]
    fn test_returns_the_same_instance() {
        let context = root_context();
        let ty = Type::parameterized(Class::vec(), [Type::Class(Class::string())]);
        let strategy = constant_value(ty.clone(), Value::new(vec!["a".to_string()]));
        let a = strategy.stub(&context, &ty).unwrap();
        let b = strategy.stub(&context, &ty).unwrap();
        assert!(a.ptr_eq(&b));
        assert!(!strategy.accepts(&context, &Type::Class(Class::vec())));
    }

    #[test]
    fn test_common_constant_values() {
        let context = root_context();
        let strategies = common_constant_values();
        let string = Type::Class(Class::string());
        let accepting = strategies.iter().find(|s| s.accepts(&context, &string)).unwrap();
        let value = accepting.stub(&context, &string).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some(""));

        let object = Type::Class(Class::object());
        assert!(strategies.iter().any(|s| s.accepts(&context, &object)));
    }
}
