//! The resolution engine
//!
//! A [`Stubber`] is an immutable, ordered chain of strategies. Resolving a type
//! walks the chain and hands the request to the first strategy that accepts it;
//! there is no fallback once a strategy has accepted.

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::builder::StubberBuilder;
use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::site::StubbingSite;
use crate::strategy::StubbingStrategy;
use crate::types::{Class, Executable, Parameter, Type};
use crate::value::Value;

/// An immutable strategy chain
///
/// Cheap to clone; clones share the same strategies and therefore the same
/// strategy state (sequence counters, memoized values).
#[derive(Clone)]
pub struct Stubber {
    strategies: Arc<[Arc<dyn StubbingStrategy>]>,
}

impl Stubber {
    pub fn builder() -> StubberBuilder {
        StubberBuilder::new()
    }

    /// A stubber trying `strategies` in the given order
    pub(crate) fn from_strategies(strategies: Vec<Arc<dyn StubbingStrategy>>) -> Self {
        Self {
            strategies: strategies.into(),
        }
    }

    /// The class descriptor under which a stubber can itself be requested
    pub fn class() -> Class {
        static STUBBER: LazyLock<Class> = LazyLock::new(Class::of::<Stubber>);
        STUBBER.clone()
    }

    /// Strategies in the order they are tried
    pub fn strategies(&self) -> &[Arc<dyn StubbingStrategy>] {
        &self.strategies
    }

    /// Produce a value of `ty` at `site`
    ///
    /// Fails with [`Error::Unresolvable`] when no strategy accepts the request.
    pub fn stub(&self, ty: &Type, site: &StubbingSite) -> Result<Value> {
        let context = StubbingContext::new(self.clone(), site.clone());
        self.resolve(&context, ty)?.ok_or_else(|| {
            tracing::debug!("No strategy accepts {} at {}", ty, site);
            Error::unresolvable(ty, site)
        })
    }

    /// Produce a value of `ty` at an unknown root site
    pub fn stub_root(&self, ty: &Type) -> Result<Value> {
        self.stub(ty, &StubbingSite::unknown())
    }

    /// Produce a value for a parameter injected into a test function
    pub fn stub_parameter(&self, executable: impl Into<Executable>, parameter: &Parameter) -> Result<Value> {
        let site = StubbingSite::test_parameter(executable, parameter)?;
        self.stub(parameter.ty(), &site)
    }

    /// Like [`stub`](Self::stub), but `Ok(None)` when no strategy accepts
    ///
    /// Errors raised by an accepting strategy are still returned.
    pub fn try_to_stub(&self, ty: &Type, site: &StubbingSite) -> Result<Option<Value>> {
        let context = StubbingContext::new(self.clone(), site.clone());
        self.resolve(&context, ty)
    }

    /// Hand the request to the first accepting strategy
    pub fn resolve(&self, context: &StubbingContext, ty: &Type) -> Result<Option<Value>> {
        tracing::trace!("Resolving {} at {}", ty, context.site());
        let Some(strategy) = self
            .strategies
            .iter()
            .find(|strategy| strategy.accepts(context, ty))
        else {
            return Ok(None);
        };
        tracing::debug!("Stubbing {} with {}", ty, strategy.name());
        strategy.stub(context, ty).map(Some)
    }
}

impl fmt::Debug for Stubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stubber")
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
