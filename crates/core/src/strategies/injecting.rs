//! Enhancers that populate produced values
//!
//! Both walk the class hierarchy of the requested type, subclass first, and
//! skip static members. Null values pass through untouched.

use std::collections::HashSet;

use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::matcher::Matcher;
use crate::site::StubbingSite;
use crate::strategies::stub_method_arguments;
use crate::strategy::Enhancer;
use crate::types::{Field, Method, Type, TypeResolver, raw_type};
use crate::value::Value;

/// Sets matching fields to stubbed values through their setters
pub struct FieldInjector {
    matcher: Box<dyn Matcher<Field>>,
}

impl FieldInjector {
    pub fn new<M: Matcher<Field> + 'static>(matcher: M) -> Self {
        Self {
            matcher: Box::new(matcher),
        }
    }
}

impl Enhancer for FieldInjector {
    fn enhance(&self, context: &StubbingContext, ty: &Type, value: Value) -> Result<Value> {
        let Some(class) = raw_type(ty).filter(|_| !value.is_null()) else {
            return Ok(value);
        };
        let resolver = TypeResolver::for_type(ty);
        for class in class.hierarchy().iter().filter(|class| !class.is_interface()) {
            for field in class.fields() {
                if field.is_static() || !self.matcher.matches(context, field) {
                    continue;
                }
                let site = StubbingSite::injected_field(context.site(), field);
                let field_value = context.stubber().stub(&resolver.resolve(field.ty()), &site)?;
                tracing::trace!("Injecting field {}", field);
                field
                    .set(&value, field_value)
                    .map_err(|e| Error::produce(ty, &site, format!("cannot set {field}: {e}")))?;
            }
        }
        Ok(value)
    }
}

/// Calls matching methods with stubbed arguments
///
/// A method overridden in a subclass is only called once, through the most
/// derived declaration.
pub struct MethodInjector {
    matcher: Box<dyn Matcher<Method>>,
}

impl MethodInjector {
    pub fn new<M: Matcher<Method> + 'static>(matcher: M) -> Self {
        Self {
            matcher: Box::new(matcher),
        }
    }

    fn methods_to_inject(&self, context: &StubbingContext, ty: &Type) -> Vec<Method> {
        let Some(class) = raw_type(ty) else {
            return Vec::new();
        };
        let mut signatures = HashSet::new();
        let mut methods = Vec::new();
        for class in class.hierarchy() {
            for method in class.methods() {
                if method.is_static() || !self.matcher.matches(context, method) {
                    continue;
                }
                let signature = (method.name().to_string(), method.parameter_types());
                if signatures.insert(signature) {
                    methods.push(method.clone());
                }
            }
        }
        methods
    }
}

impl Enhancer for MethodInjector {
    fn enhance(&self, context: &StubbingContext, ty: &Type, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }
        let resolver = TypeResolver::for_type(ty);
        for method in self.methods_to_inject(context, ty) {
            let arguments = stub_method_arguments(context, &method, &resolver)?;
            tracing::trace!("Injecting through {}", method);
            method
                .invoke(Some(&value), &arguments)
                .map_err(|e| Error::produce(ty, context.site(), format!("{method} failed: {e}")))?;
        }
        Ok(value)
    }
}
