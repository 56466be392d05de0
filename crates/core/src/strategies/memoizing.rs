use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::StubbingContext;
use crate::error::Result;
use crate::site::StubbingSite;
use crate::strategy::StubbingStrategy;
use crate::types::{AnnotatedElement, Type};
use crate::value::Value;

type CustomDiscriminator = Arc<dyn Fn(&StubbingContext, &Type) -> Option<String> + Send + Sync>;

/// Decides which requests for the same type share a memoized value
#[derive(Clone, Default)]
pub enum Discriminator {
    /// One value per type, wherever it is requested
    #[default]
    Type,
    /// One value per type and nearest enclosing annotated element
    NearestAnnotatedElement,
    /// One value per type and caller-computed key
    Custom(CustomDiscriminator),
}

impl Discriminator {
    pub fn custom<F>(key: F) -> Self
    where
        F: Fn(&StubbingContext, &Type) -> Option<String> + Send + Sync + 'static,
    {
        Discriminator::Custom(Arc::new(key))
    }

    fn key(&self, context: &StubbingContext, ty: &Type) -> MemoKey {
        match self {
            Discriminator::Type => MemoKey::Shared,
            Discriminator::NearestAnnotatedElement => nearest_annotated_element(context.site())
                .map_or(MemoKey::Shared, MemoKey::Element),
            Discriminator::Custom(key) => (**key)(context, ty).map_or(MemoKey::Shared, MemoKey::Custom),
        }
    }
}

impl fmt::Debug for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discriminator::Type => f.write_str("Type"),
            Discriminator::NearestAnnotatedElement => f.write_str("NearestAnnotatedElement"),
            Discriminator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MemoKey {
    Shared,
    Element(AnnotatedElement),
    Custom(String),
}

/// The closest annotated element on the way from `site` to its root
pub fn nearest_annotated_element(site: &StubbingSite) -> Option<AnnotatedElement> {
    site.walk().find_map(StubbingSite::annotated_element)
}

/// Reuses the first value produced per (type, discriminator key)
///
/// Values are cached for the lifetime of the strategy, which usually means the
/// lifetime of the stubber that owns it.
pub struct MemoizingStrategy {
    inner: Arc<dyn StubbingStrategy>,
    discriminator: Discriminator,
    memo: Mutex<HashMap<(Type, MemoKey), Value>>,
}

impl MemoizingStrategy {
    pub fn new<S: StubbingStrategy + 'static>(inner: S) -> Self {
        Self::with_discriminator(inner, Discriminator::Type)
    }

    pub fn with_discriminator<S: StubbingStrategy + 'static>(inner: S, discriminator: Discriminator) -> Self {
        Self {
            inner: Arc::new(inner),
            discriminator,
            memo: Mutex::new(HashMap::new()),
        }
    }
}

impl StubbingStrategy for MemoizingStrategy {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        self.inner.accepts(context, ty)
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        let key = (ty.clone(), self.discriminator.key(context, ty));
        if let Some(value) = self.memo.lock().get(&key) {
            tracing::trace!("Memoized value hit for {}", ty);
            return Ok(value.clone());
        }

        // The lock is released while stubbing: the inner strategy may recurse into us.
        let site = StubbingSite::memoizing(context.site());
        let value = self.inner.stub(&context.fork(site), ty)?;
        tracing::debug!("Memoizing value for {}", ty);
        Ok(self.memo.lock().entry(key).or_insert(value).clone())
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
