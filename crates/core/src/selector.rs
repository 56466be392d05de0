//! Selector algebra
//!
//! A [`Selector`] picks at most one value out of an ordered list of candidates.
//! Candidates may be absent (`None`); an absent result means nothing was chosen.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::context::StubbingContext;
use crate::matcher::Matcher;

/// Chooses one of several candidates
pub trait Selector<T>: Send + Sync {
    fn select(&self, context: &StubbingContext, candidates: &[Option<T>]) -> Option<T>;

    /// Select from candidates that are all present
    fn select_from(&self, context: &StubbingContext, candidates: impl IntoIterator<Item = T>) -> Option<T>
    where
        Self: Sized,
    {
        let candidates: Vec<Option<T>> = candidates.into_iter().map(Some).collect();
        self.select(context, &candidates)
    }
}

impl<T, F> Selector<T> for F
where
    F: Fn(&StubbingContext, &[Option<T>]) -> Option<T> + Send + Sync,
{
    fn select(&self, context: &StubbingContext, candidates: &[Option<T>]) -> Option<T> {
        self(context, candidates)
    }
}

/// The first present candidate
pub fn first<T: Clone>() -> impl Selector<T> {
    |_: &StubbingContext, candidates: &[Option<T>]| candidates.iter().flatten().next().cloned()
}

/// Picks uniformly at random from an injected source of randomness
pub struct RandomSelector<R> {
    rng: Mutex<R>,
}

impl<R: Rng + Send> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<T: Clone, R: Rng + Send> Selector<T> for RandomSelector<R> {
    fn select(&self, _context: &StubbingContext, candidates: &[Option<T>]) -> Option<T> {
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.lock().gen_range(0..candidates.len());
        tracing::trace!("Randomly selected candidate {} of {}", index, candidates.len());
        candidates[index].clone()
    }
}

/// A reproducible random selector
pub fn random(seed: u64) -> RandomSelector<StdRng> {
    RandomSelector::new(StdRng::seed_from_u64(seed))
}

/// The single candidate accepted by `matcher`; absent when zero or several match
pub fn from_matcher<T: Clone, M: Matcher<T>>(matcher: M) -> impl Selector<T> {
    move |context: &StubbingContext, candidates: &[Option<T>]| {
        let mut matching = candidates
            .iter()
            .flatten()
            .filter(|candidate| matcher.matches(context, candidate));
        match (matching.next(), matching.next()) {
            (Some(only), None) => Some(only.clone()),
            (Some(_), Some(_)) => {
                tracing::debug!("Ambiguous selection: more than one candidate matches");
                None
            }
            _ => None,
        }
    }
}

/// Tries each selector in order, returning the first present result
pub struct CompositeSelector<T> {
    selectors: Vec<Box<dyn Selector<T>>>,
}

impl<T> CompositeSelector<T> {
    pub fn new() -> Self {
        Self {
            selectors: Vec::new(),
        }
    }

    pub fn or_else<S: Selector<T> + 'static>(mut self, selector: S) -> Self {
        self.selectors.push(Box::new(selector));
        self
    }
}

impl<T> Default for CompositeSelector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Selector<T> for CompositeSelector<T> {
    fn select(&self, context: &StubbingContext, candidates: &[Option<T>]) -> Option<T> {
        self.selectors
            .iter()
            .find_map(|selector| selector.select(context, candidates))
    }
}

/// Start a fallback chain with `selector`
pub fn compose<T, S: Selector<T> + 'static>(selector: S) -> CompositeSelector<T> {
    CompositeSelector::new().or_else(selector)
}
