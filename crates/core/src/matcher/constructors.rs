//! Matchers over constructors, for use with the constructor strategy

use super::{Matcher, annotated_with as annotated_element_with};
use crate::context::StubbingContext;
use crate::types::{Class, Constructor};

pub fn any() -> impl Matcher<Constructor> {
    |_: &StubbingContext, _: &Constructor| true
}

/// Matches the no-argument constructor
pub fn is_default() -> impl Matcher<Constructor> {
    |_: &StubbingContext, constructor: &Constructor| constructor.is_default()
}

pub fn is_public() -> impl Matcher<Constructor> {
    |_: &StubbingContext, constructor: &Constructor| constructor.is_public()
}

/// See [`accepts`](super::accepts)
pub fn accepting(parameter_types: impl IntoIterator<Item = Class>) -> impl Matcher<Constructor> {
    super::accepts(parameter_types)
}

pub fn annotated_with(name: impl Into<String>) -> impl Matcher<Constructor> {
    annotated_element_with(name)
}
