//! Matchers over methods, for use with the factory method strategy and method injection

use super::Matcher;
use crate::context::StubbingContext;
use crate::types::Method;

pub fn any() -> impl Matcher<Method> {
    |_: &StubbingContext, _: &Method| true
}

pub fn named(name: impl Into<String>) -> impl Matcher<Method> {
    let name = name.into();
    move |_: &StubbingContext, method: &Method| method.name() == name
}

pub fn is_static() -> impl Matcher<Method> {
    |_: &StubbingContext, method: &Method| method.is_static()
}

/// Matches `set_*` methods taking exactly one argument
pub fn is_setter() -> impl Matcher<Method> {
    |_: &StubbingContext, method: &Method| {
        method.name().starts_with("set_") && method.parameters().len() == 1 && !method.is_static()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatcherExt;
    use crate::matcher::fixtures::root_context;
    use crate::types::{Class, Type};

    #[test]
    fn test_method_matchers() {
        let class = Class::builder("demo.Account")
            .method("of", Class::named("demo.Account"), |m| {
                m.set_static(true);
            })
            .method("set_owner", Type::Class(Class::of::<()>()), |m| {
                m.parameter("owner", Class::string());
            })
            .build();
        let context = root_context();
        let [of, set_owner] = class.methods() else {
            panic!("expected two methods");
        };
        assert!(any().matches(&context, of));
        assert!(named("of").and(is_static()).matches(&context, of));
        assert!(!is_static().matches(&context, set_owner));
        assert!(is_setter().matches(&context, set_owner));
        assert!(!is_setter().matches(&context, of));
    }
}
