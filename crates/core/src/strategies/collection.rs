use std::fmt;
use std::sync::Arc;

use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::site::StubbingSite;
use crate::strategy::StubbingStrategy;
use crate::strategies::unwrap_wildcards;
use crate::types::{Class, ParameterizedType, Type, raw_type};
use crate::value::Value;

/// How many elements a collection strategy produces
#[derive(Clone)]
pub enum CollectionSize {
    Fixed(usize),
    /// Computed from the context of each request
    Computed(Arc<dyn Fn(&StubbingContext) -> usize + Send + Sync>),
}

impl CollectionSize {
    pub fn computed<F>(size: F) -> Self
    where
        F: Fn(&StubbingContext) -> usize + Send + Sync + 'static,
    {
        CollectionSize::Computed(Arc::new(size))
    }

    pub fn get(&self, context: &StubbingContext) -> usize {
        match self {
            CollectionSize::Fixed(size) => *size,
            CollectionSize::Computed(size) => size(context),
        }
    }
}

impl From<usize> for CollectionSize {
    fn from(size: usize) -> Self {
        CollectionSize::Fixed(size)
    }
}

impl fmt::Debug for CollectionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionSize::Fixed(size) => write!(f, "Fixed({size})"),
            CollectionSize::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Requests for `class`, either raw or parameterized with `arity` arguments
enum Shape {
    Raw,
    Parameterized(ParameterizedType),
}

fn shape_of(ty: &Type, class: &Class, arity: usize) -> Option<Shape> {
    match unwrap_wildcards(ty)? {
        Type::Class(raw) if raw == *class => Some(Shape::Raw),
        Type::Parameterized(parameterized)
            if parameterized.raw() == class && parameterized.arguments().len() == arity =>
        {
            Some(Shape::Parameterized(parameterized))
        }
        _ => None,
    }
}

type CollectionFactory = Box<dyn Fn(Vec<Value>) -> Value + Send + Sync>;

/// Builds a collection class from stubbed elements
///
/// Raw requests carry no element type and are only accepted when no elements
/// are to be produced.
pub struct CollectionStrategy {
    class: Class,
    factory: CollectionFactory,
    size: CollectionSize,
}

impl CollectionStrategy {
    pub fn new<F>(class: Class, factory: F, size: CollectionSize) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            class,
            factory: Box::new(factory),
            size,
        }
    }
}

impl StubbingStrategy for CollectionStrategy {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        match shape_of(ty, &self.class, 1) {
            Some(Shape::Raw) => self.size.get(context) == 0,
            Some(Shape::Parameterized(_)) => true,
            None => false,
        }
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        let size = self.size.get(context);
        let elements = match shape_of(ty, &self.class, 1) {
            Some(Shape::Raw) if size == 0 => Vec::new(),
            Some(Shape::Parameterized(parameterized)) => {
                let site = StubbingSite::type_argument(context.site(), &parameterized, 0)?;
                let element = &parameterized.arguments()[0];
                (0..size)
                    .map(|_| context.stubber().stub(element, &site))
                    .collect::<Result<Vec<_>>>()?
            }
            _ => return Err(Error::unresolvable(ty, context.site())),
        };
        tracing::trace!("Stubbed {} with {} elements", ty, elements.len());
        Ok((self.factory)(elements))
    }
}

type MapFactory = Box<dyn Fn(Vec<(Value, Value)>) -> Value + Send + Sync>;

/// Builds a map class from stubbed keys and values
pub struct MapStrategy {
    class: Class,
    factory: MapFactory,
    size: CollectionSize,
}

impl MapStrategy {
    pub fn new<F>(class: Class, factory: F, size: CollectionSize) -> Self
    where
        F: Fn(Vec<(Value, Value)>) -> Value + Send + Sync + 'static,
    {
        Self {
            class,
            factory: Box::new(factory),
            size,
        }
    }
}

impl StubbingStrategy for MapStrategy {
    fn accepts(&self, context: &StubbingContext, ty: &Type) -> bool {
        match shape_of(ty, &self.class, 2) {
            Some(Shape::Raw) => self.size.get(context) == 0,
            Some(Shape::Parameterized(_)) => true,
            None => false,
        }
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        let size = self.size.get(context);
        let entries = match shape_of(ty, &self.class, 2) {
            Some(Shape::Raw) if size == 0 => Vec::new(),
            Some(Shape::Parameterized(parameterized)) => {
                let key_site = StubbingSite::type_argument(context.site(), &parameterized, 0)?;
                let value_site = StubbingSite::type_argument(context.site(), &parameterized, 1)?;
                let (key, value) = (&parameterized.arguments()[0], &parameterized.arguments()[1]);
                let stubber = context.stubber();
                (0..size)
                    .map(|_| -> Result<(Value, Value)> {
                        Ok((stubber.stub(key, &key_site)?, stubber.stub(value, &value_site)?))
                    })
                    .collect::<Result<Vec<_>>>()?
            }
            _ => return Err(Error::unresolvable(ty, context.site())),
        };
        tracing::trace!("Stubbed {} with {} entries", ty, entries.len());
        Ok((self.factory)(entries))
    }
}

/// Produces array classes and generic arrays as `Vec<Value>`
pub struct ArrayStrategy {
    size: CollectionSize,
}

impl ArrayStrategy {
    pub fn new(size: CollectionSize) -> Self {
        Self { size }
    }

    fn component_of(ty: &Type) -> Option<Type> {
        match unwrap_wildcards(ty)? {
            Type::Class(class) => class.component_type().cloned().map(Type::Class),
            Type::GenericArray(array) => {
                raw_type(array.component())?;
                Some(array.component().clone())
            }
            _ => None,
        }
    }
}

impl StubbingStrategy for ArrayStrategy {
    fn accepts(&self, _context: &StubbingContext, ty: &Type) -> bool {
        Self::component_of(ty).is_some()
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        let component = Self::component_of(ty).ok_or_else(|| Error::unresolvable(ty, context.site()))?;
        let site = StubbingSite::array_element(context.site(), component.clone());
        let elements = (0..self.size.get(context))
            .map(|_| context.stubber().stub(&component, &site))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::new(elements))
    }
}
