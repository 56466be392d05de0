use super::{Class, GenericArrayType, ParameterizedType, Type, TypeVariable, WildcardType};
use crate::error::{Error, Result};

/// Structural dispatch over the five type shapes
///
/// Every handler defaults to an [`Error::UnsupportedType`] failure, so a visitor
/// only implements the shapes it understands and anything else surfaces
/// immediately instead of being ignored.
pub trait TypeVisitor {
    type Output;

    /// Name used in unsupported-type errors
    fn operation(&self) -> &'static str {
        "type visitor"
    }

    fn visit_class(&mut self, class: &Class) -> Result<Self::Output> {
        Err(unsupported(Type::Class(class.clone()), self.operation()))
    }

    fn visit_parameterized(&mut self, ty: &ParameterizedType) -> Result<Self::Output> {
        Err(unsupported(Type::Parameterized(ty.clone()), self.operation()))
    }

    fn visit_wildcard(&mut self, ty: &WildcardType) -> Result<Self::Output> {
        Err(unsupported(Type::Wildcard(ty.clone()), self.operation()))
    }

    fn visit_variable(&mut self, ty: &TypeVariable) -> Result<Self::Output> {
        Err(unsupported(Type::Variable(ty.clone()), self.operation()))
    }

    fn visit_generic_array(&mut self, ty: &GenericArrayType) -> Result<Self::Output> {
        Err(unsupported(Type::GenericArray(ty.clone()), self.operation()))
    }
}

/// Route `ty` to the matching handler of `visitor`
pub fn accept<V: TypeVisitor + ?Sized>(ty: &Type, visitor: &mut V) -> Result<V::Output> {
    match ty {
        Type::Class(class) => visitor.visit_class(class),
        Type::Parameterized(parameterized) => visitor.visit_parameterized(parameterized),
        Type::Wildcard(wildcard) => visitor.visit_wildcard(wildcard),
        Type::Variable(variable) => visitor.visit_variable(variable),
        Type::GenericArray(array) => visitor.visit_generic_array(array),
    }
}

fn unsupported(ty: Type, operation: &'static str) -> Error {
    Error::UnsupportedType { ty, operation }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClassNames;

    impl TypeVisitor for ClassNames {
        type Output = String;

        fn operation(&self) -> &'static str {
            "class names"
        }

        fn visit_class(&mut self, class: &Class) -> Result<String> {
            Ok(class.name().to_string())
        }
    }

    #[test]
    fn test_dispatch_to_handler() {
        let name = accept(&Type::Class(Class::string()), &mut ClassNames).unwrap();
        assert_eq!(name, "alloc::string::String");
    }

    #[test]
    fn test_unhandled_shape_is_unsupported() {
        let ty = Type::variable("demo.Box", "T");
        let err = accept(&ty, &mut ClassNames).unwrap_err();
        match err {
            Error::UnsupportedType { ty: actual, operation } => {
                assert_eq!(actual, ty);
                assert_eq!(operation, "class names");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
