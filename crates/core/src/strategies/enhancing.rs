use std::sync::Arc;

use crate::context::StubbingContext;
use crate::error::Result;
use crate::strategy::{Enhancer, StubbingStrategy};
use crate::types::Type;
use crate::value::Value;

/// A strategy whose values are rewritten by an [`Enhancer`] before being returned
///
/// Wrapping an enhancing strategy again stacks the enhancers; the outermost one
/// runs last.
pub struct EnhancingStrategy {
    inner: Arc<dyn StubbingStrategy>,
    enhancer: Box<dyn Enhancer>,
}

impl EnhancingStrategy {
    pub fn new<S, E>(inner: S, enhancer: E) -> Self
    where
        S: StubbingStrategy + 'static,
        E: Enhancer + 'static,
    {
        Self {
            inner: Arc::new(inner),
            enhancer: Box::new(enhancer),
        }
    }
}

impl StubbingStrategy for EnhancingStrategy {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        self.inner.accepts(context, ty)
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        let value = self.inner.stub(context, ty)?;
        self.enhancer.enhance(context, ty, value)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
