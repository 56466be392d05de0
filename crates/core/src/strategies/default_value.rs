use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::strategy::StubbingStrategy;
use crate::strategies::unwrap_wildcards;
use crate::types::Type;
use crate::value::Value;

/// The zero value of a primitive, by class name
fn default_for(name: &str) -> Option<Value> {
    let value = match name {
        "bool" => Value::new(false),
        "char" => Value::new('\0'),
        "i8" => Value::new(0i8),
        "i16" => Value::new(0i16),
        "i32" => Value::new(0i32),
        "i64" => Value::new(0i64),
        "i128" => Value::new(0i128),
        "isize" => Value::new(0isize),
        "u8" => Value::new(0u8),
        "u16" => Value::new(0u16),
        "u32" => Value::new(0u32),
        "u64" => Value::new(0u64),
        "u128" => Value::new(0u128),
        "usize" => Value::new(0usize),
        "f32" => Value::new(0f32),
        "f64" => Value::new(0f64),
        _ => return None,
    };
    Some(value)
}

/// Zero values for `bool`, `char` and the numeric primitives
pub struct DefaultValueStrategy;

impl DefaultValueStrategy {
    fn value_for(ty: &Type) -> Option<Value> {
        match unwrap_wildcards(ty)? {
            Type::Class(class) if class.is_primitive() => default_for(class.name()),
            _ => None,
        }
    }
}

impl StubbingStrategy for DefaultValueStrategy {
    fn accepts(&self, _context: &StubbingContext, ty: &Type) -> bool {
        Self::value_for(ty).is_some()
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        Self::value_for(ty).ok_or_else(|| Error::unresolvable(ty, context.site()))
    }
}
