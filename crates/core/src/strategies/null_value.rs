use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::strategy::StubbingStrategy;
use crate::types::{Type, raw_type};
use crate::value::Value;

/// Null for any type whose raw class is not primitive
pub struct NullValueStrategy;

impl StubbingStrategy for NullValueStrategy {
    fn accepts(&self, _context: &StubbingContext, ty: &Type) -> bool {
        raw_type(ty).is_some_and(|class| !class.is_primitive())
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        if !self.accepts(context, ty) {
            return Err(Error::unresolvable(ty, context.site()));
        }
        Ok(Value::null())
    }
}
