//! Matcher algebra
//!
//! A [`Matcher`] is a predicate over a resolution context and a candidate. The
//! same abstraction gates strategies (candidate = requested [`Type`]) and filters
//! candidates in selectors (constructors, methods, values).
//!
//! [`Type`]: crate::types::Type

mod annotation;
mod executable;
mod site;
mod types;

pub mod constructors;
pub mod methods;

pub use annotation::{annotated_with, annotated_with_annotation, annotated_with_type, non_null, nullable};
pub use executable::accepts;
pub use site::{
    annotated_site_is, array_element_is, constructor_is, executable_is, field_is, method_is,
    parameter_is, parent, site, site_named, site_named_like,
};
pub use types::{raw_type_is, type_is};

use std::any::Any;

use crate::context::StubbingContext;
use crate::value::Value;

/// A predicate over a context and a candidate
pub trait Matcher<T: ?Sized>: Send + Sync {
    fn matches(&self, context: &StubbingContext, value: &T) -> bool;
}

impl<T: ?Sized, F> Matcher<T> for F
where
    F: Fn(&StubbingContext, &T) -> bool + Send + Sync,
{
    fn matches(&self, context: &StubbingContext, value: &T) -> bool {
        self(context, value)
    }
}

/// Boolean combinators available on every matcher
pub trait MatcherExt<T: ?Sized>: Matcher<T> + Sized {
    /// Both must match; `other` is not consulted if `self` fails
    fn and<M: Matcher<T>>(self, other: M) -> And<Self, M> {
        And(self, other)
    }

    /// Either must match; `other` is not consulted if `self` matches
    fn or<M: Matcher<T>>(self, other: M) -> Or<Self, M> {
        Or(self, other)
    }

    fn negate(self) -> Not<Self> {
        Not(self)
    }
}

impl<T: ?Sized, M: Matcher<T>> MatcherExt<T> for M {}

pub struct And<A, B>(A, B);

impl<T: ?Sized, A: Matcher<T>, B: Matcher<T>> Matcher<T> for And<A, B> {
    fn matches(&self, context: &StubbingContext, value: &T) -> bool {
        self.0.matches(context, value) && self.1.matches(context, value)
    }
}

pub struct Or<A, B>(A, B);

impl<T: ?Sized, A: Matcher<T>, B: Matcher<T>> Matcher<T> for Or<A, B> {
    fn matches(&self, context: &StubbingContext, value: &T) -> bool {
        self.0.matches(context, value) || self.1.matches(context, value)
    }
}

pub struct Not<A>(A);

impl<T: ?Sized, A: Matcher<T>> Matcher<T> for Not<A> {
    fn matches(&self, context: &StubbingContext, value: &T) -> bool {
        !self.0.matches(context, value)
    }
}

/// Matches everything
pub fn any<T: ?Sized>() -> impl Matcher<T> {
    |_: &StubbingContext, _: &T| true
}

/// Inverts `matcher`
pub fn not<T: ?Sized, M: Matcher<T>>(matcher: M) -> Not<M> {
    Not(matcher)
}

/// Matches candidates equal to `expected`
pub fn equal_to<T>(expected: T) -> impl Matcher<T>
where
    T: PartialEq + Send + Sync,
{
    move |_: &StubbingContext, value: &T| *value == expected
}

/// Project the candidate through `extractor` before matching
pub fn mapped_to<T: ?Sized, U, F, M>(extractor: F, delegate: M) -> impl Matcher<T>
where
    F: Fn(&T) -> U + Send + Sync,
    M: Matcher<U>,
{
    move |context: &StubbingContext, value: &T| delegate.matches(context, &extractor(value))
}

/// Matches values holding a `U`
pub fn instance_of<U: Any>() -> impl Matcher<Value> {
    |_: &StubbingContext, value: &Value| value.is::<U>()
}

/// Matches values holding a `U` that `delegate` accepts
pub fn instance_of_matching<U: Any, M: Matcher<U>>(delegate: M) -> impl Matcher<Value> {
    move |context: &StubbingContext, value: &Value| {
        value
            .downcast_ref::<U>()
            .is_some_and(|narrowed| delegate.matches(context, narrowed))
    }
}
