use std::sync::atomic::{AtomicU64, Ordering};

use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::strategy::StubbingStrategy;
use crate::strategies::unwrap_wildcards;
use crate::types::Type;
use crate::value::Value;

type Supplier = Box<dyn Fn(&StubbingContext, u64) -> Result<Value> + Send + Sync>;

/// Produces values from a supplier that receives a sequence number
///
/// The sequence starts at zero and every call reserves the next number before
/// the supplier runs, so sibling elements of a collection, nested calls and
/// concurrent callers all get distinguishable values. A failing supplier still
/// consumes its number.
pub struct SuppliedValueStrategy {
    ty: Type,
    supplier: Supplier,
    sequence: AtomicU64,
}

impl SuppliedValueStrategy {
    pub fn new<F>(ty: Type, supplier: F) -> Self
    where
        F: Fn(&StubbingContext, u64) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            ty,
            supplier: Box::new(supplier),
            sequence: AtomicU64::new(0),
        }
    }
}

impl StubbingStrategy for SuppliedValueStrategy {
    fn accepts(&self, _context: &StubbingContext, ty: &Type) -> bool {
        unwrap_wildcards(ty).is_some_and(|ty| ty == self.ty)
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        if !self.accepts(context, ty) {
            return Err(Error::unresolvable(ty, context.site()));
        }
        let sequence_number = self.sequence.fetch_add(1, Ordering::SeqCst);
        let value = (self.supplier)(context, sequence_number)?;
        tracing::trace!("Supplied value #{} for {}", sequence_number, ty);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::matcher::fixtures::root_context;
    use crate::site::StubbingSite;
    use crate::strategies::fixtures::{sequenced_strings, string, stubber_of};
    use crate::strategy::StubbingStrategyExt;
    use crate::strategies::{common_supplied_values, supplied_value};
    use crate::types::Class;

    #[test]
    fn test_sequence_numbers_increase() {
        let context = root_context();
        let ty = Type::Class(Class::string());
        let strategy = sequenced_strings();
        let values: Vec<String> = (0..3)
            .map(|_| string(&strategy.stub(&context, &ty).unwrap()))
            .collect();
        assert_eq!(values, ["value0", "value1", "value2"]);
    }

    #[test]
    fn test_failed_supply_consumes_number() {
        let context = root_context();
        let ty = Type::Class(Class::string());
        let strategy = supplied_value(Class::string(), |context: &StubbingContext, n| {
            if n == 0 || n == 3 {
                Ok(Value::from(format!("value{n}")))
            } else {
                Err(Error::produce(&Type::Class(Class::string()), context.site(), "exhausted"))
            }
        });
        assert_eq!(string(&strategy.stub(&context, &ty).unwrap()), "value0");
        assert!(strategy.stub(&context, &ty).is_err());
        assert!(strategy.stub(&context, &ty).is_err());
        assert_eq!(string(&strategy.stub(&context, &ty).unwrap()), "value3");
    }

    #[test]
    fn test_nested_supply_gets_next_number() {
        let strategy = supplied_value(Class::string(), |context: &StubbingContext, n| {
            if context.site().is_root() {
                let inner = context
                    .stubber()
                    .stub(&Type::Class(Class::string()), &StubbingSite::memoizing(context.site()))?;
                Ok(Value::from(format!("outer{n}/{}", string(&inner))))
            } else {
                Ok(Value::from(format!("inner{n}")))
            }
        });
        let stubber = stubber_of(vec![strategy.boxed()]);
        let value = stubber.stub_root(&Type::Class(Class::string())).unwrap();
        assert_eq!(string(&value), "outer0/inner1");
    }

    #[test]
    fn test_concurrent_supply_gets_distinct_numbers() {
        let stubber = stubber_of(vec![sequenced_strings().boxed()]);
        let ty = Type::Class(Class::string());
        let values: HashSet<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| string(&stubber.stub_root(&ty).unwrap())))
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });
        assert_eq!(values.len(), 8);
        assert!((0..8).all(|n| values.contains(&format!("value{n}"))));
    }

    #[test]
    fn test_common_supplied_values_are_fresh() {
        let context = root_context();
        let ty = Type::Class(Class::of::<std::sync::atomic::AtomicI32>());
        let strategies = common_supplied_values();
        let strategy = strategies.iter().find(|s| s.accepts(&context, &ty)).unwrap();
        let a = strategy.stub(&context, &ty).unwrap();
        let b = strategy.stub(&context, &ty).unwrap();
        assert!(!a.ptr_eq(&b));
        assert!(a.is::<std::sync::atomic::AtomicI32>());
    }
}
