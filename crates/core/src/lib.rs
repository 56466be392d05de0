//! stubr-core - Resolution engine for test-data stubbing
//!
//! A [`Stubber`] produces values for arbitrary described types by walking an
//! ordered chain of [`StubbingStrategy`]s. This crate provides:
//! - Type descriptors and the stubbing-site lineage model
//! - Matcher and selector algebras for context-sensitive decisions
//! - Built-in strategies, presets and a builder to compose them
pub mod builder;
pub mod context;
pub mod error;
pub mod matcher;
pub mod presets;
pub mod selector;
pub mod settings;
pub mod site;
pub mod strategies;
pub mod strategy;
pub mod stubber;
pub mod types;
pub mod value;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

pub use builder::StubberBuilder;
pub use context::StubbingContext;
pub use matcher::{Matcher, MatcherExt};
pub use presets::Baseline;
pub use selector::Selector;
pub use settings::StubberSettings;
pub use site::{SiteKind, StubbingSite};
pub use strategy::{Enhancer, StubbingStrategy, StubbingStrategyExt};
pub use stubber::Stubber;
pub use value::Value;
