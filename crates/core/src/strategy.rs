//! The strategy contract
//!
//! A [`StubbingStrategy`] is the unit of extensibility: it decides whether it can
//! produce a value for a requested type at the current site, and produces it.
//! Strategies pattern-match on the [`Type`] shape themselves; there is no
//! per-shape subclassing.

use std::sync::Arc;

use crate::context::StubbingContext;
use crate::error::Result;
use crate::matcher::Matcher;
use crate::strategies::{ConditionalStrategy, EnhancingStrategy, MemoizingStrategy};
use crate::types::Type;
use crate::value::Value;

/// Produces stub values for the types it accepts
pub trait StubbingStrategy: Send + Sync {
    /// Whether this strategy can produce a value of `ty` in `context`
    ///
    /// Acceptance must reliably predict success: once a strategy accepted, the
    /// stubber commits to it and does not fall back if [`stub`](Self::stub) fails.
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool;

    /// Produce a value of `ty`
    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value>;

    /// Name used in logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<S: StubbingStrategy + ?Sized> StubbingStrategy for Arc<S> {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        (**self).accepts(context, ty)
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        (**self).stub(context, ty)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: StubbingStrategy + ?Sized> StubbingStrategy for Box<S> {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        (**self).accepts(context, ty)
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        (**self).stub(context, ty)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Post-processes a produced value
pub trait Enhancer: Send + Sync {
    fn enhance(&self, context: &StubbingContext, ty: &Type, value: Value) -> Result<Value>;
}

impl<F> Enhancer for F
where
    F: Fn(&StubbingContext, &Type, Value) -> Result<Value> + Send + Sync,
{
    fn enhance(&self, context: &StubbingContext, ty: &Type, value: Value) -> Result<Value> {
        self(context, ty, value)
    }
}

/// Decorators available on every strategy
pub trait StubbingStrategyExt: StubbingStrategy + Sized + 'static {
    /// Only accept when `matcher` also matches the requested type
    fn when<M>(self, matcher: M) -> ConditionalStrategy
    where
        M: Matcher<Type> + 'static,
    {
        ConditionalStrategy::new(self, matcher)
    }

    /// Rewrite every produced value with `enhancer`
    fn enhanced_with<E>(self, enhancer: E) -> EnhancingStrategy
    where
        E: Enhancer + 'static,
    {
        EnhancingStrategy::new(self, enhancer)
    }

    /// Reuse the first value produced for each requested type
    fn memoized(self) -> MemoizingStrategy {
        MemoizingStrategy::new(self)
    }

    fn boxed(self) -> Arc<dyn StubbingStrategy> {
        Arc::new(self)
    }
}

impl<S: StubbingStrategy + Sized + 'static> StubbingStrategyExt for S {}
