use std::collections::HashMap;

use parking_lot::Mutex;

use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::strategies::stub_method_arguments;
use crate::strategy::StubbingStrategy;
use crate::types::{Class, Method, Type, TypeResolver, Visibility, raw_type};
use crate::value::Value;

/// Produces values by calling a static factory method of the requested class
///
/// Candidates are the non-private static methods whose raw return type is
/// assignable from the requested class.
pub struct FactoryMethodStrategy {
    selector: Box<dyn Selector<Method>>,
    selected: Mutex<HashMap<Class, Option<Method>>>,
}

impl FactoryMethodStrategy {
    pub fn new<S: Selector<Method> + 'static>(selector: S) -> Self {
        Self {
            selector: Box::new(selector),
            selected: Mutex::new(HashMap::new()),
        }
    }

    fn factory_method_for(&self, context: &StubbingContext, ty: &Type) -> Option<Method> {
        let class = raw_type(ty)
            .filter(|class| !class.is_primitive() && !class.is_enum() && !class.is_interface())?;
        if class.methods().is_empty() {
            return None;
        }
        if let Some(selected) = self.selected.lock().get(&class) {
            return selected.clone();
        }

        let candidates: Vec<Option<Method>> = class
            .methods()
            .iter()
            .filter(|method| method.is_static() && method.visibility() != Visibility::Private)
            .filter(|method| {
                method
                    .return_type()
                    .raw_type()
                    .is_some_and(|returned| returned.is_assignable_from(&class))
            })
            .cloned()
            .map(Some)
            .collect();
        let selected = self.selector.select(context, &candidates);
        tracing::debug!(
            "Selected factory method for {}: {}",
            class,
            selected.as_ref().map_or_else(|| "none".to_string(), ToString::to_string)
        );
        self.selected.lock().insert(class, selected.clone());
        selected
    }
}

impl StubbingStrategy for FactoryMethodStrategy {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        self.factory_method_for(context, ty).is_some()
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        let method = self
            .factory_method_for(context, ty)
            .ok_or_else(|| Error::unresolvable(ty, context.site()))?;
        let resolver = TypeResolver::for_type(ty).bind(method.return_type(), ty);
        let arguments = stub_method_arguments(context, &method, &resolver)?;
        method
            .invoke(None, &arguments)
            .map_err(|e| Error::produce(ty, context.site(), format!("{method} failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{fixtures::root_context, methods};
    use crate::strategies::fixtures::{sequenced_strings, string, stubber_of};
    use crate::strategies::{factory_method_matching, supplied_value};
    use crate::strategy::StubbingStrategyExt;

    #[derive(Debug)]
    struct Money {
        currency: String,
    }

    fn money() -> Class {
        Class::builder("finance.Money")
            .method("of", Class::named("finance.Money"), |m| {
                m.set_static(true)
                    .parameter("currency", Class::string())
                    .invoke(|_, arguments| {
                        Ok(Value::new(Money {
                            currency: string(&arguments[0]),
                        }))
                    });
            })
            .method("zero", Class::named("finance.Money"), |m| {
                m.set_static(true).visibility(Visibility::Private);
            })
            .method("plus", Class::named("finance.Money"), |m| {
                m.parameter("other", Class::named("finance.Money"));
            })
            .build()
    }

    #[test]
    fn test_invokes_single_candidate() {
        let stubber = stubber_of(vec![
            factory_method_matching(methods::any()).boxed(),
            sequenced_strings().boxed(),
        ]);
        let value = stubber.stub_root(&Type::Class(money())).unwrap();
        assert_eq!(value.downcast_ref::<Money>().unwrap().currency, "value0");
    }

    #[test]
    fn test_matcher_filters_candidates() {
        let context = root_context();
        let ty = Type::Class(money());
        assert!(factory_method_matching(methods::named("of")).accepts(&context, &ty));
        assert!(!factory_method_matching(methods::named("zero")).accepts(&context, &ty));
        assert!(!factory_method_matching(methods::named("plus")).accepts(&context, &ty));
    }

    #[test]
    fn test_generic_factory_method_binds_return_type() {
        let boxed = Class::builder("demo.Wrapper")
            .type_parameter("T")
            .method(
                "wrap",
                Type::parameterized(Class::named("demo.Wrapper"), [Type::variable("demo.Wrapper::wrap", "U")]),
                |m| {
                    m.set_static(true)
                        .type_parameter("U")
                        .parameter("value", Type::variable("demo.Wrapper::wrap", "U"))
                        .invoke(|_, arguments| Ok(arguments[0].clone()));
                },
            )
            .build();
        let lengths = supplied_value(Class::of::<u32>(), |_: &StubbingContext, n| Ok(Value::new(n as u32 + 7)));
        let stubber = stubber_of(vec![
            factory_method_matching(methods::any()).boxed(),
            lengths.boxed(),
        ]);
        let ty = Type::parameterized(boxed, [Type::Class(Class::of::<u32>())]);
        let value = stubber.stub_root(&ty).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&7));
    }

    #[test]
    fn test_rejects_interfaces() {
        let shape = Class::builder("shapes.Shape")
            .kind(crate::types::ClassKind::Interface)
            .method("circle", Class::named("shapes.Shape"), |m| {
                m.set_static(true);
            })
            .build();
        assert!(!factory_method_matching(methods::any()).accepts(&root_context(), &Type::Class(shape)));
    }
}
