use super::Matcher;
use crate::context::StubbingContext;
use crate::types::{Class, Signature};

/// Matches executables whose declared parameters accept arguments of `parameter_types`
///
/// The arity must be equal, then each declared parameter's raw type must be
/// assignable from the expected class at the same position.
pub fn accepts<T: Signature + ?Sized>(parameter_types: impl IntoIterator<Item = Class>) -> impl Matcher<T> {
    let expected: Vec<Class> = parameter_types.into_iter().collect();
    move |_: &StubbingContext, executable: &T| {
        let parameters = executable.parameters();
        parameters.len() == expected.len()
            && parameters.iter().zip(&expected).all(|(parameter, expected)| {
                parameter
                    .raw_type()
                    .is_some_and(|declared| declared.is_assignable_from(expected))
            })
    }
}
