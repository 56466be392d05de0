//! Built-in stubbing strategies
//!
//! Every strategy here is an ordinary [`StubbingStrategy`]. The free functions in
//! this module are the intended way to construct them; the presets in
//! [`crate::presets`] are assembled from the same functions.

mod collection;
mod conditional;
mod constant;
mod constructor;
mod default_value;
mod enhancing;
mod enum_value;
mod factory_method;
mod implementation;
mod injecting;
mod memoizing;
mod null_value;
mod optional;
mod stubber;
mod supplied;

pub use collection::{ArrayStrategy, CollectionSize, CollectionStrategy, MapStrategy};
pub use conditional::ConditionalStrategy;
pub use constant::ConstantValueStrategy;
pub use constructor::ConstructorStrategy;
pub use default_value::DefaultValueStrategy;
pub use enhancing::EnhancingStrategy;
pub use enum_value::EnumValueStrategy;
pub use factory_method::FactoryMethodStrategy;
pub use implementation::ImplementationStrategy;
pub use injecting::{FieldInjector, MethodInjector};
pub use memoizing::{Discriminator, MemoizingStrategy, nearest_annotated_element};
pub use null_value::NullValueStrategy;
pub use optional::{OptionalMode, OptionalStrategy};
pub use stubber::StubberStrategy;
pub use supplied::SuppliedValueStrategy;

use std::any::Any;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicI64, AtomicUsize};
use std::time::{Duration, SystemTime};

use crate::context::StubbingContext;
use crate::error::Result;
use crate::matcher::{self, Matcher, MatcherExt};
use crate::selector::{self, Selector};
use crate::site::StubbingSite;
use crate::strategy::{Enhancer, StubbingStrategy};
use crate::types::{Class, Constructor, Field, Method, Type, TypeResolver, bound};
use crate::value::Value;

/// Replace wildcards by their bound until a concrete shape remains
///
/// Absent when a wildcard has no usable bound.
pub(crate) fn unwrap_wildcards(ty: &Type) -> Option<Type> {
    let mut current = ty.clone();
    while let Type::Wildcard(wildcard) = &current {
        current = bound(wildcard)?;
    }
    Some(current)
}

/// Stub one argument per parameter of `method`, resolving generic parameter types
pub(crate) fn stub_method_arguments(
    context: &StubbingContext,
    method: &Method,
    resolver: &TypeResolver,
) -> Result<Vec<Value>> {
    method
        .parameters()
        .iter()
        .map(|parameter| {
            let site = StubbingSite::method_parameter(context.site(), method, parameter)?;
            context.stubber().stub(&resolver.resolve(parameter.ty()), &site)
        })
        .collect()
}

/// Zero values for the Rust primitives
pub fn default_value() -> DefaultValueStrategy {
    DefaultValueStrategy
}

/// Always produce `value` for `ty`
pub fn constant_value(ty: impl Into<Type>, value: Value) -> ConstantValueStrategy {
    ConstantValueStrategy::new(ty.into(), value)
}

/// Always produce `value` for the class of `T`
pub fn constant<T: Any + Send + Sync>(value: T) -> ConstantValueStrategy {
    constant_value(Class::of::<T>(), Value::new(value))
}

/// Constants for the top type, `()` and `String`
pub fn common_constant_values() -> Vec<Arc<dyn StubbingStrategy>> {
    vec![
        Arc::new(constant_value(Class::object(), Value::new(()))),
        Arc::new(constant(())),
        Arc::new(constant(String::new())),
    ]
}

/// Produce values from `supplier`, which also receives a per-strategy sequence number
pub fn supplied_value<F>(ty: impl Into<Type>, supplier: F) -> SuppliedValueStrategy
where
    F: Fn(&StubbingContext, u64) -> Result<Value> + Send + Sync + 'static,
{
    SuppliedValueStrategy::new(ty.into(), supplier)
}

/// Fresh instances of common mutable and time types
pub fn common_supplied_values() -> Vec<Arc<dyn StubbingStrategy>> {
    fn fresh<T, F>(make: F) -> Arc<dyn StubbingStrategy>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Arc::new(supplied_value(Class::of::<T>(), move |_: &StubbingContext, _| {
            Ok(Value::new(make()))
        }))
    }

    vec![
        fresh(|| AtomicBool::new(false)),
        fresh(|| AtomicI32::new(0)),
        fresh(|| AtomicI64::new(0)),
        fresh(|| AtomicUsize::new(0)),
        fresh(|| SystemTime::UNIX_EPOCH),
        fresh(|| Duration::ZERO),
    ]
}

/// Null for every non-primitive type
pub fn null_value() -> NullValueStrategy {
    NullValueStrategy
}

/// `Option<T>` values, produced as `Option<Value>`
pub fn optional(mode: OptionalMode) -> OptionalStrategy {
    OptionalStrategy::new(mode)
}

/// A collection class whose values are built by `factory` from the stubbed elements
///
/// Use [`CollectionStrategy::new`] for a size computed per request.
pub fn collection<F>(class: Class, factory: F, size: usize) -> CollectionStrategy
where
    F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
{
    CollectionStrategy::new(class, factory, CollectionSize::Fixed(size))
}

/// A map class whose values are built by `factory` from the stubbed entries
pub fn map<F>(class: Class, factory: F, size: usize) -> MapStrategy
where
    F: Fn(Vec<(Value, Value)>) -> Value + Send + Sync + 'static,
{
    MapStrategy::new(class, factory, CollectionSize::Fixed(size))
}

/// Arrays of `size` elements, produced as `Vec<Value>`
pub fn array(size: usize) -> ArrayStrategy {
    ArrayStrategy::new(CollectionSize::Fixed(size))
}

/// Collections for `Vec`, `VecDeque`, `HashSet`, `BTreeSet`, `HashMap` and `BTreeMap`
///
/// Elements are type-erased, so sets hold their elements as `Vec<Value>` and maps
/// their entries as `Vec<(Value, Value)>`. Sequences keep their own container.
pub fn default_collections(size: usize) -> Vec<Arc<dyn StubbingStrategy>> {
    vec![
        Arc::new(collection(Class::vec(), Value::new, size)),
        Arc::new(collection(
            Class::vec_deque(),
            |elements| Value::new(elements.into_iter().collect::<VecDeque<_>>()),
            size,
        )),
        Arc::new(collection(Class::hash_set(), Value::new, size)),
        Arc::new(collection(Class::btree_set(), Value::new, size)),
        Arc::new(map(Class::hash_map(), Value::new, size)),
        Arc::new(map(Class::btree_map(), Value::new, size)),
    ]
}

pub fn empty_default_collections() -> Vec<Arc<dyn StubbingStrategy>> {
    default_collections(0)
}

/// Instantiate concrete classes through the constructor chosen by `selector`
pub fn constructor<S: Selector<Constructor> + 'static>(selector: S) -> ConstructorStrategy {
    ConstructorStrategy::new(selector)
}

/// Instantiate concrete classes through their only constructor accepted by `matcher`
pub fn constructor_matching<M: Matcher<Constructor> + 'static>(matcher: M) -> ConstructorStrategy {
    constructor(selector::from_matcher(matcher))
}

/// The non-private constructor without parameters
pub fn default_constructor() -> ConstructorStrategy {
    constructor_matching(matcher::constructors::is_default())
}

/// The only non-private constructor taking parameters
pub fn non_default_constructor() -> ConstructorStrategy {
    constructor_matching(matcher::constructors::is_default().negate())
}

/// Produce values through the static factory method chosen by `selector`
pub fn factory_method<S: Selector<Method> + 'static>(selector: S) -> FactoryMethodStrategy {
    FactoryMethodStrategy::new(selector)
}

/// Produce values through the only factory method accepted by `matcher`
pub fn factory_method_matching<M: Matcher<Method> + 'static>(matcher: M) -> FactoryMethodStrategy {
    factory_method(selector::from_matcher(matcher))
}

/// The first declared enum constant
pub fn enum_value() -> EnumValueStrategy {
    enum_value_with(selector::first())
}

/// The enum constant chosen by `selector`
pub fn enum_value_with<S: Selector<Value> + 'static>(selector: S) -> EnumValueStrategy {
    EnumValueStrategy::new(selector)
}

/// Resolve `implementation` wherever `target` is requested
pub fn implementation(target: impl Into<Type>, implementation: impl Into<Type>) -> ImplementationStrategy {
    ImplementationStrategy::new(target.into(), implementation.into())
}

/// The active stubber itself
pub fn stubber() -> StubberStrategy {
    StubberStrategy
}

/// Set every non-static field accepted by `matcher` to a stubbed value
pub fn inject_fields<M: Matcher<Field> + 'static>(matcher: M) -> FieldInjector {
    FieldInjector::new(matcher)
}

/// Call every non-static method accepted by `matcher` with stubbed arguments
pub fn inject_methods<M: Matcher<Method> + 'static>(matcher: M) -> MethodInjector {
    MethodInjector::new(matcher)
}

/// Reuse the first value produced for each requested type
pub fn memoizing<S: StubbingStrategy + 'static>(inner: S) -> MemoizingStrategy {
    MemoizingStrategy::new(inner)
}

/// Reuse values per requested type and `discriminator`
pub fn memoizing_by<S: StubbingStrategy + 'static>(inner: S, discriminator: Discriminator) -> MemoizingStrategy {
    MemoizingStrategy::with_discriminator(inner, discriminator)
}

/// Gate `inner` behind a matcher on the requested type
pub fn conditional<S, M>(inner: S, matcher: M) -> ConditionalStrategy
where
    S: StubbingStrategy + 'static,
    M: Matcher<Type> + 'static,
{
    ConditionalStrategy::new(inner, matcher)
}

/// Rewrite every value produced by `inner` with `enhancer`
pub fn enhancing<S, E>(inner: S, enhancer: E) -> EnhancingStrategy
where
    S: StubbingStrategy + 'static,
    E: Enhancer + 'static,
{
    EnhancingStrategy::new(inner, enhancer)
}
