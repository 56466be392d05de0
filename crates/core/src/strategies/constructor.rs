use std::collections::HashMap;

use parking_lot::Mutex;

use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::site::StubbingSite;
use crate::strategy::StubbingStrategy;
use crate::types::{Class, Constructor, Type, TypeResolver, Visibility, raw_type};
use crate::value::Value;

fn is_instantiable(class: &Class) -> bool {
    !class.is_abstract() && !class.is_primitive() && !class.is_enum() && !class.is_array()
}

/// Instantiates concrete classes through a selected constructor
///
/// Only non-private constructors are candidates. Every parameter is stubbed at a
/// constructor parameter site. The selection is remembered per class.
pub struct ConstructorStrategy {
    selector: Box<dyn Selector<Constructor>>,
    selected: Mutex<HashMap<Class, Option<Constructor>>>,
}

impl ConstructorStrategy {
    pub fn new<S: Selector<Constructor> + 'static>(selector: S) -> Self {
        Self {
            selector: Box::new(selector),
            selected: Mutex::new(HashMap::new()),
        }
    }

    fn constructor_for(&self, context: &StubbingContext, ty: &Type) -> Option<Constructor> {
        let class = raw_type(ty).filter(is_instantiable)?;
        if class.constructors().is_empty() {
            return None;
        }
        if let Some(selected) = self.selected.lock().get(&class) {
            return selected.clone();
        }

        let candidates: Vec<Option<Constructor>> = class
            .constructors()
            .iter()
            .filter(|constructor| constructor.visibility() != Visibility::Private)
            .cloned()
            .map(Some)
            .collect();
        let selected = self.selector.select(context, &candidates);
        tracing::debug!(
            "Selected constructor for {}: {}",
            class,
            selected.as_ref().map_or_else(|| "none".to_string(), ToString::to_string)
        );
        self.selected.lock().insert(class, selected.clone());
        selected
    }
}

impl StubbingStrategy for ConstructorStrategy {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        self.constructor_for(context, ty).is_some()
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        let constructor = self
            .constructor_for(context, ty)
            .ok_or_else(|| Error::unresolvable(ty, context.site()))?;
        let resolver = TypeResolver::for_type(ty);
        let arguments = constructor
            .parameters()
            .iter()
            .map(|parameter| {
                let site = StubbingSite::constructor_parameter(context.site(), &constructor, parameter)?;
                context.stubber().stub(&resolver.resolve(parameter.ty()), &site)
            })
            .collect::<Result<Vec<_>>>()?;
        constructor
            .new_instance(&arguments)
            .map_err(|e| Error::produce(ty, context.site(), format!("{constructor} failed: {e}")))
    }
}
