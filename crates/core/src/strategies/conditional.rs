use std::sync::Arc;

use crate::context::StubbingContext;
use crate::error::Result;
use crate::matcher::Matcher;
use crate::strategy::StubbingStrategy;
use crate::types::Type;
use crate::value::Value;

/// A strategy that only accepts when an extra matcher agrees
pub struct ConditionalStrategy {
    inner: Arc<dyn StubbingStrategy>,
    matcher: Arc<dyn Matcher<Type>>,
}

impl ConditionalStrategy {
    pub fn new<S, M>(inner: S, matcher: M) -> Self
    where
        S: StubbingStrategy + 'static,
        M: Matcher<Type> + 'static,
    {
        Self::shared(Arc::new(inner), Arc::new(matcher))
    }

    /// Gate an already shared strategy behind an already shared matcher
    pub fn shared(inner: Arc<dyn StubbingStrategy>, matcher: Arc<dyn Matcher<Type>>) -> Self {
        Self { inner, matcher }
    }
}

impl StubbingStrategy for ConditionalStrategy {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        self.inner.accepts(context, ty) && self.matcher.matches(context, ty)
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        self.inner.stub(context, ty)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
