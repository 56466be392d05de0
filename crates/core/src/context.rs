//! Resolution context passed to strategies and matchers

use crate::site::StubbingSite;
use crate::stubber::Stubber;

/// The active stubber paired with the site currently being resolved
#[derive(Debug, Clone)]
pub struct StubbingContext {
    stubber: Stubber,
    site: StubbingSite,
}

impl StubbingContext {
    pub fn new(stubber: Stubber, site: StubbingSite) -> Self {
        Self { stubber, site }
    }

    /// Stubber to recurse into for nested values
    pub fn stubber(&self) -> &Stubber {
        &self.stubber
    }

    pub fn site(&self) -> &StubbingSite {
        &self.site
    }

    /// Same stubber, different site
    pub fn fork(&self, site: StubbingSite) -> Self {
        Self {
            stubber: self.stubber.clone(),
            site,
        }
    }

    /// A context for the parent of the current site, if there is one
    pub fn parent(&self) -> Option<Self> {
        self.site.parent().map(|parent| self.fork(parent.clone()))
    }
}
