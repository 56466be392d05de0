//! Assembles strategy chains
//!
//! Precedence, highest first: strategies added directly (most recent first),
//! included stubbers (most recently included first), then the baseline preset.

use std::sync::Arc;

use crate::matcher::Matcher;
use crate::presets::Baseline;
use crate::strategies::ConditionalStrategy;
use crate::strategy::StubbingStrategy;
use crate::stubber::Stubber;
use crate::types::Type;

/// Builder for [`Stubber`]
///
/// Starts without a baseline, so an unconfigured builder yields a stubber that
/// accepts nothing.
pub struct StubberBuilder {
    baseline: Baseline,
    includes: Vec<Stubber>,
    strategies: Vec<Arc<dyn StubbingStrategy>>,
}

impl StubberBuilder {
    pub fn new() -> Self {
        Self {
            baseline: Baseline::Empty,
            includes: Vec::new(),
            strategies: Vec::new(),
        }
    }

    /// Fall back to a preset when nothing else accepts
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Include every strategy of `stubber`, with lower priority than direct additions
    ///
    /// The included stubber's strategies are shared, not copied, so their state
    /// (sequence counters, memoized values) is shared as well.
    pub fn include(mut self, stubber: &Stubber) -> Self {
        self.includes.push(stubber.clone());
        self
    }

    /// Add a strategy that overrides everything added before it
    pub fn stub_with<S: StubbingStrategy + 'static>(self, strategy: S) -> Self {
        self.stub_with_shared(Arc::new(strategy))
    }

    /// Add a strategy that only applies where `matcher` agrees
    pub fn stub_with_when<S, M>(self, strategy: S, matcher: M) -> Self
    where
        S: StubbingStrategy + 'static,
        M: Matcher<Type> + 'static,
    {
        self.stub_with(ConditionalStrategy::new(strategy, matcher))
    }

    /// Add several strategies, the last one winning
    pub fn stub_with_all(self, strategies: impl IntoIterator<Item = Arc<dyn StubbingStrategy>>) -> Self {
        strategies
            .into_iter()
            .fold(self, |builder, strategy| builder.stub_with_shared(strategy))
    }

    /// Add several strategies, each gated behind the same matcher
    pub fn stub_with_all_when<M>(
        self,
        strategies: impl IntoIterator<Item = Arc<dyn StubbingStrategy>>,
        matcher: M,
    ) -> Self
    where
        M: Matcher<Type> + 'static,
    {
        let matcher: Arc<dyn Matcher<Type>> = Arc::new(matcher);
        strategies.into_iter().fold(self, |builder, strategy| {
            builder.stub_with(ConditionalStrategy::shared(strategy, matcher.clone()))
        })
    }

    fn stub_with_shared(mut self, strategy: Arc<dyn StubbingStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Flatten everything into an immutable chain
    pub fn build(self) -> Stubber {
        let baseline = self.baseline.stubber();
        let strategies: Vec<Arc<dyn StubbingStrategy>> = self
            .strategies
            .into_iter()
            .rev()
            .chain(
                self.includes
                    .iter()
                    .rev()
                    .flat_map(|included| included.strategies().iter().cloned()),
            )
            .chain(baseline.strategies().iter().cloned())
            .collect();
        tracing::debug!(
            "Built stubber with {} strategies ({:?} baseline, {} includes)",
            strategies.len(),
            self.baseline,
            self.includes.len()
        );
        Stubber::from_strategies(strategies)
    }
}

impl Default for StubberBuilder {
    fn default() -> Self {
        Self::new()
    }
}
