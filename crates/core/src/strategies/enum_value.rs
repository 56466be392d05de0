use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::strategy::StubbingStrategy;
use crate::strategies::unwrap_wildcards;
use crate::types::Type;
use crate::value::Value;

/// Picks one of the constants declared by an enum class
///
/// Enums without constants, or whose constants the selector rejects, are not
/// accepted.
pub struct EnumValueStrategy {
    selector: Box<dyn Selector<Value>>,
}

impl EnumValueStrategy {
    pub fn new<S: Selector<Value> + 'static>(selector: S) -> Self {
        Self {
            selector: Box::new(selector),
        }
    }

    fn select(&self, context: &StubbingContext, ty: &Type) -> Option<Value> {
        match unwrap_wildcards(ty)? {
            Type::Class(class) if class.is_enum() => {
                let constants: Vec<Option<Value>> =
                    class.enum_constants().iter().cloned().map(Some).collect();
                self.selector.select(context, &constants)
            }
            _ => None,
        }
    }
}

impl StubbingStrategy for EnumValueStrategy {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        self.select(context, ty).is_some()
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        self.select(context, ty)
            .ok_or_else(|| Error::unresolvable(ty, context.site()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::fixtures::root_context;
    use crate::selector;
    use crate::strategies::fixtures::string;
    use crate::strategies::{enum_value, enum_value_with};
    use crate::types::Class;

    fn color() -> Type {
        Type::Class(
            Class::builder("paint.Color")
                .enum_constant("RED")
                .enum_constant("GREEN")
                .enum_constant("BLUE")
                .build(),
        )
    }

    #[test]
    fn test_first_constant() {
        let value = enum_value().stub(&root_context(), &color()).unwrap();
        assert_eq!(string(&value), "RED");
    }

    #[test]
    fn test_selector_decides() {
        let context = root_context();
        let last = |_: &StubbingContext, candidates: &[Option<Value>]| candidates.last().cloned().flatten();
        let value = enum_value_with(last).stub(&context, &color()).unwrap();
        assert_eq!(string(&value), "BLUE");

        let a = enum_value_with(selector::random(3));
        let b = enum_value_with(selector::random(3));
        for _ in 0..5 {
            assert_eq!(
                string(&a.stub(&context, &color()).unwrap()),
                string(&b.stub(&context, &color()).unwrap())
            );
        }
    }

    #[test]
    fn test_rejects_empty_enums_and_classes() {
        let context = root_context();
        let empty = Class::builder("paint.Empty").kind(crate::types::ClassKind::Enum).build();
        assert!(!enum_value().accepts(&context, &Type::Class(empty)));
        assert!(!enum_value().accepts(&context, &Type::Class(Class::string())));
    }
}
