//! Projections of the current stubbing site
//!
//! Each projection first checks that the context's site is of the expected kind
//! and then delegates on the extracted payload. A site of the wrong kind never
//! matches.

use regex::Regex;

use super::Matcher;
use crate::context::StubbingContext;
use crate::site::{SiteKind, StubbingSite};
use crate::types::{AnnotatedElement, Constructor, Executable, Field, Method, Parameter, Type};

/// Match the current site itself
pub fn site<T: ?Sized, M: Matcher<StubbingSite>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| delegate.matches(context, context.site())
}

/// Evaluate `delegate` against the same candidate in a context re-derived from the
/// parent site. Root sites never match.
pub fn parent<T: ?Sized, M: Matcher<T>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, value: &T| {
        context
            .parent()
            .is_some_and(|parent| delegate.matches(&parent, value))
    }
}

pub fn annotated_site_is<T: ?Sized, M: Matcher<AnnotatedElement>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| {
        context
            .site()
            .annotated_element()
            .is_some_and(|element| delegate.matches(context, &element))
    }
}

pub fn executable_is<T: ?Sized, M: Matcher<Executable>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| {
        context
            .site()
            .executable()
            .is_some_and(|executable| delegate.matches(context, &executable))
    }
}

pub fn constructor_is<T: ?Sized, M: Matcher<Constructor>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| {
        context
            .site()
            .constructor()
            .is_some_and(|constructor| delegate.matches(context, constructor))
    }
}

pub fn method_is<T: ?Sized, M: Matcher<Method>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| {
        context
            .site()
            .method()
            .is_some_and(|method| delegate.matches(context, method))
    }
}

pub fn parameter_is<T: ?Sized, M: Matcher<Parameter>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| {
        context
            .site()
            .parameter()
            .is_some_and(|parameter| delegate.matches(context, parameter))
    }
}

pub fn field_is<T: ?Sized, M: Matcher<Field>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| {
        context
            .site()
            .field()
            .is_some_and(|field| delegate.matches(context, field))
    }
}

/// Match the component type of an array element site
pub fn array_element_is<T: ?Sized, M: Matcher<Type>>(delegate: M) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| match context.site().kind() {
        SiteKind::ArrayElement { component } => delegate.matches(context, component),
        _ => false,
    }
}

/// Matches sites whose parameter, field or method is called `name`
pub fn site_named<T: ?Sized>(name: impl Into<String>) -> impl Matcher<T> {
    let name = name.into();
    move |context: &StubbingContext, _: &T| context.site().name() == Some(name.as_str())
}

/// Like [`site_named`], matching the name against a regular expression
pub fn site_named_like<T: ?Sized>(pattern: Regex) -> impl Matcher<T> {
    move |context: &StubbingContext, _: &T| {
        context
            .site()
            .name()
            .is_some_and(|name| pattern.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::fixtures::{context_at, root_context};
    use crate::matcher::{MatcherExt, annotated_with, any, constructors};
    use crate::types::{Annotation, Class};

    fn person() -> Class {
        Class::builder("people.Person")
            .annotation(Annotation::new("Entity"))
            .constructor(|c| {
                c.annotated_parameter("first_name", Class::string(), [Annotation::new("Foo")]);
            })
            .method("create", Class::named("people.Person"), |m| {
                m.annotated_parameter("first_name", Class::string(), [Annotation::new("Foo")]);
            })
            .build()
    }

    fn constructor_site() -> StubbingSite {
        let person = person();
        StubbingSite::constructor_parameter_at(&StubbingSite::unknown(), &person.constructors()[0], 0)
            .unwrap()
    }

    fn string() -> Type {
        Type::Class(Class::string())
    }

    #[test]
    fn test_annotated_site_projection() {
        let context = context_at(constructor_site());
        assert!(annotated_site_is(annotated_with("Foo")).matches(&context, &string()));
        assert!(!annotated_site_is(annotated_with("Bar")).matches(&context, &string()));
        assert!(!annotated_site_is(any()).matches(&root_context(), &string()));
    }

    #[test]
    fn test_wrong_site_kind_does_not_match() {
        let context = context_at(constructor_site());
        assert!(!method_is(any()).matches(&context, &string()));
        assert!(!field_is(any()).matches(&context, &string()));
        assert!(!array_element_is(any()).matches(&context, &string()));
        assert!(constructor_is(constructors::any()).matches(&context, &string()));
        assert!(parameter_is(annotated_with("Foo")).matches(&context, &string()));
        assert!(executable_is(any()).matches(&context, &string()));
    }

    #[test]
    fn test_parent_of_constructor_parameter_is_not_a_method_parameter() {
        let context = context_at(constructor_site());
        let parent_is_annotated_method_parameter =
            parent(method_is(any()).and(parameter_is(annotated_with("Foo"))));
        assert!(!parent_is_annotated_method_parameter.matches(&context, &string()));
        assert!(annotated_site_is(annotated_with("Foo")).matches(&context, &string()));
    }

    #[test]
    fn test_parent_rederives_context() {
        let person = person();
        let method = &person.methods()[0];
        let outer = StubbingSite::method_parameter_at(&StubbingSite::unknown(), method, 0).unwrap();
        let inner = StubbingSite::array_element(&outer, Class::string());
        let context = context_at(inner);

        let matcher = parent(parameter_is(annotated_with("Foo")));
        assert!(matcher.matches(&context, &string()));
        assert!(!parameter_is(annotated_with("Foo")).matches(&context, &string()));
        assert!(array_element_is(any()).matches(&context, &string()));
        assert!(!parent(any()).matches(&root_context(), &string()));
    }

    #[test]
    fn test_site_names() {
        let context = context_at(constructor_site());
        assert!(site_named("first_name").matches(&context, &string()));
        assert!(!site_named("last_name").matches(&context, &string()));
        let like = site_named_like(Regex::new("^first").unwrap());
        assert!(like.matches(&context, &string()));
        assert!(!like.matches(&root_context(), &string()));
    }

    #[test]
    fn test_site_projection() {
        let context = context_at(constructor_site());
        let has_parent = |_: &StubbingContext, site: &StubbingSite| site.parent().is_some();
        assert!(site(has_parent).matches(&context, &string()));
        assert!(!site(has_parent).matches(&root_context(), &string()));
    }
}
