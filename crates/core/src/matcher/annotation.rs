use super::{Matcher, MatcherExt};
use crate::context::StubbingContext;
use crate::types::{Annotated, Annotation};

/// Matches elements carrying an annotation with the given qualified or simple name
pub fn annotated_with<T: Annotated + ?Sized>(name: impl Into<String>) -> impl Matcher<T> {
    let name = name.into();
    move |_: &StubbingContext, element: &T| element.is_annotated_with(&name)
}

/// Matches elements carrying an annotation of exactly this qualified type name
pub fn annotated_with_type<T: Annotated + ?Sized>(type_name: impl Into<String>) -> impl Matcher<T> {
    let type_name = type_name.into();
    move |_: &StubbingContext, element: &T| {
        element
            .annotations()
            .iter()
            .any(|annotation| annotation.type_name() == type_name)
    }
}

/// Matches elements carrying an annotation equal to `annotation`, attributes included
pub fn annotated_with_annotation<T: Annotated + ?Sized>(annotation: Annotation) -> impl Matcher<T> {
    move |_: &StubbingContext, element: &T| {
        element
            .annotations()
            .iter()
            .any(|candidate| *candidate == annotation)
    }
}

/// Matches elements annotated `Nullable`
pub fn nullable<T: Annotated + ?Sized>() -> impl Matcher<T> {
    annotated_with("Nullable")
}

/// Matches elements annotated `NotNull`, `NonNull` or `Nonnull`
pub fn non_null<T: Annotated + ?Sized>() -> impl Matcher<T> {
    annotated_with("NotNull")
        .or(annotated_with("NonNull"))
        .or(annotated_with("Nonnull"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::fixtures::root_context;
    use crate::types::{AnnotatedElement, Class};

    fn element(annotations: &[Annotation]) -> AnnotatedElement {
        let builder = annotations
            .iter()
            .cloned()
            .fold(Class::builder("demo.Annotated"), |builder, a| builder.annotation(a));
        AnnotatedElement::Class(builder.build())
    }

    #[test]
    fn test_annotated_with_name() {
        let context = root_context();
        let element = element(&[Annotation::new("org.jetbrains.annotations.Nullable")]);
        assert!(annotated_with("Nullable").matches(&context, &element));
        assert!(annotated_with("org.jetbrains.annotations.Nullable").matches(&context, &element));
        assert!(!annotated_with("NotNull").matches(&context, &element));
        assert!(nullable().matches(&context, &element));
    }

    #[test]
    fn test_annotated_with_type_requires_qualified_name() {
        let context = root_context();
        let element = element(&[Annotation::new("javax.annotation.Nonnull")]);
        assert!(annotated_with_type("javax.annotation.Nonnull").matches(&context, &element));
        assert!(!annotated_with_type("Nonnull").matches(&context, &element));
    }

    #[test]
    fn test_annotated_with_annotation_compares_attributes() {
        let context = root_context();
        let element = element(&[Annotation::new("demo.Size").with("value", "3")]);
        assert!(
            annotated_with_annotation(Annotation::new("demo.Size").with("value", "3"))
                .matches(&context, &element)
        );
        assert!(
            !annotated_with_annotation(Annotation::new("demo.Size").with("value", "4"))
                .matches(&context, &element)
        );
    }

    #[test]
    fn test_annotated_with_annotation_checks_every_repetition() {
        let context = root_context();
        let element = element(&[
            Annotation::new("demo.Tag").with("value", "a"),
            Annotation::new("demo.Tag").with("value", "b"),
        ]);
        for value in ["a", "b"] {
            assert!(
                annotated_with_annotation(Annotation::new("demo.Tag").with("value", value))
                    .matches(&context, &element)
            );
        }
        assert!(
            !annotated_with_annotation(Annotation::new("demo.Tag").with("value", "c"))
                .matches(&context, &element)
        );
    }

    #[test]
    fn test_non_null_variants() {
        let context = root_context();
        for name in ["NotNull", "NonNull", "lombok.NonNull", "Nonnull"] {
            assert!(non_null().matches(&context, &element(&[Annotation::new(name)])));
        }
        assert!(!non_null().matches(&context, &element(&[Annotation::new("Nullable")])));
        assert!(!nullable().matches(&context, &element(&[])));
    }
}
