use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::strategy::StubbingStrategy;
use crate::stubber::Stubber;
use crate::strategies::unwrap_wildcards;
use crate::types::Type;
use crate::value::Value;

/// Produces the stubber driving the current resolution
pub struct StubberStrategy;

impl StubbingStrategy for StubberStrategy {
    fn accepts(&self, _context: &StubbingContext, ty: &Type) -> bool {
        matches!(unwrap_wildcards(ty), Some(Type::Class(class)) if class == Stubber::class())
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        if !self.accepts(context, ty) {
            return Err(Error::unresolvable(ty, context.site()));
        }
        Ok(Value::new(context.stubber().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::fixtures::root_context;
    use crate::types::Class;

    #[test]
    fn test_produces_active_stubber() {
        let context = root_context();
        let ty = Type::Class(Stubber::class());
        assert!(StubberStrategy.accepts(&context, &ty));
        let value = StubberStrategy.stub(&context, &ty).unwrap();
        assert!(value.is::<Stubber>());
        assert!(!StubberStrategy.accepts(&context, &Type::Class(Class::string())));
    }
}
