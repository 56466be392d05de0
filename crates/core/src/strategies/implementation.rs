use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::strategy::StubbingStrategy;
use crate::strategies::unwrap_wildcards;
use crate::types::Type;
use crate::value::Value;

/// Resolves a substitute type wherever the target type is requested
///
/// The substitute is resolved at the same site, so matchers see the original
/// request location.
pub struct ImplementationStrategy {
    target: Type,
    implementation: Type,
}

impl ImplementationStrategy {
    pub fn new(target: Type, implementation: Type) -> Self {
        Self {
            target,
            implementation,
        }
    }
}

impl StubbingStrategy for ImplementationStrategy {
    fn accepts(&self, _context: &StubbingContext, ty: &Type) -> bool {
        unwrap_wildcards(ty).is_some_and(|ty| ty == self.target)
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        if !self.accepts(context, ty) {
            return Err(Error::unresolvable(ty, context.site()));
        }
        tracing::debug!("Resolving {} as {}", ty, self.implementation);
        context.stubber().stub(&self.implementation, context.site())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::fixtures::root_context;
    use crate::strategies::{constant_value, fixtures::stubber_of, implementation};
    use crate::strategy::StubbingStrategyExt;
    use crate::types::{Class, ClassKind};

    #[test]
    fn test_resolves_implementation_type() {
        let shape = Class::builder("shapes.Shape").kind(ClassKind::Interface).build();
        let circle = Class::named("shapes.Circle");
        let stubber = stubber_of(vec![
            implementation(shape.clone(), circle.clone()).boxed(),
            constant_value(circle, Value::from("circle")).boxed(),
        ]);
        let value = stubber.stub_root(&Type::Class(shape)).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("circle"));
        assert!(!implementation(Class::string(), Class::string())
            .accepts(&root_context(), &Type::Class(Class::of::<i32>())));
    }
}
