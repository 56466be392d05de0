use super::Matcher;
use crate::context::StubbingContext;
use crate::types::{Class, Type};

/// Matches types whose raw class equals `class`
pub fn raw_type_is(class: Class) -> impl Matcher<Type> {
    move |_: &StubbingContext, ty: &Type| ty.raw_type().as_ref() == Some(&class)
}

/// Matches types structurally equal to `expected`
pub fn type_is(expected: impl Into<Type>) -> impl Matcher<Type> {
    let expected = expected.into();
    move |_: &StubbingContext, ty: &Type| *ty == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::fixtures::root_context;

    #[test]
    fn test_raw_type_is_ignores_arguments() {
        let context = root_context();
        let strings = Type::parameterized(Class::vec(), [Type::Class(Class::string())]);
        assert!(raw_type_is(Class::vec()).matches(&context, &strings));
        assert!(!raw_type_is(Class::hash_set()).matches(&context, &strings));
        assert!(!raw_type_is(Class::vec()).matches(&context, &Type::variable("demo.Box", "T")));
    }

    #[test]
    fn test_type_is_compares_arguments() {
        let context = root_context();
        let strings = Type::parameterized(Class::vec(), [Type::Class(Class::string())]);
        let ints = Type::parameterized(Class::vec(), [Type::Class(Class::primitive("i32"))]);
        assert!(type_is(strings.clone()).matches(&context, &strings));
        assert!(!type_is(strings).matches(&context, &ints));
        assert!(type_is(Class::string()).matches(&context, &Type::Class(Class::string())));
    }
}
