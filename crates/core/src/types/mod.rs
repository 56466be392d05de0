//! Type descriptors
//!
//! Every requested value is described by a [`Type`]: a closed five-way union of
//! plain classes, parameterized types, wildcards, type variables and generic
//! arrays. Descriptors are explicit schemas; nothing here depends on runtime
//! reflection.

mod class;
mod member;
mod resolver;
mod visitor;

pub use class::{Class, ClassBuilder, ClassKind, Visibility};
pub use member::{
    Annotated, AnnotatedElement, Annotation, BoxError, Constructor, ConstructorBuilder,
    Executable, Field, FieldBuilder, Method, MethodBuilder, Parameter, Signature,
};
pub use resolver::{TypeResolver, as_supertype};
pub use visitor::{TypeVisitor, accept};

use std::fmt;
use std::hash::{Hash, Hasher};

/// A requested type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A plain class, primitive or array class
    Class(Class),
    /// A generic class with concrete type arguments, e.g. `Vec<String>`
    Parameterized(ParameterizedType),
    /// A wildcard type argument, e.g. `? extends Number`
    Wildcard(WildcardType),
    /// A type variable declared on a generic class or method
    Variable(TypeVariable),
    /// An array whose component type is generic
    GenericArray(GenericArrayType),
}

impl Type {
    /// Create a parameterized type
    pub fn parameterized(raw: Class, arguments: impl IntoIterator<Item = Type>) -> Self {
        Type::Parameterized(ParameterizedType::new(raw, arguments))
    }

    /// Create a generic array type
    pub fn generic_array(component: impl Into<Type>) -> Self {
        Type::GenericArray(GenericArrayType::new(component))
    }

    /// Create a type variable reference
    pub fn variable(declared_by: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Variable(TypeVariable::new(declared_by, name))
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Type::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_parameterized(&self) -> Option<&ParameterizedType> {
        match self {
            Type::Parameterized(parameterized) => Some(parameterized),
            _ => None,
        }
    }

    /// Shorthand for [`raw_type`]
    pub fn raw_type(&self) -> Option<Class> {
        raw_type(self)
    }
}

impl From<Class> for Type {
    fn from(class: Class) -> Self {
        Type::Class(class)
    }
}

impl From<&Class> for Type {
    fn from(class: &Class) -> Self {
        Type::Class(class.clone())
    }
}

impl From<ParameterizedType> for Type {
    fn from(parameterized: ParameterizedType) -> Self {
        Type::Parameterized(parameterized)
    }
}

impl From<WildcardType> for Type {
    fn from(wildcard: WildcardType) -> Self {
        Type::Wildcard(wildcard)
    }
}

impl From<TypeVariable> for Type {
    fn from(variable: TypeVariable) -> Self {
        Type::Variable(variable)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Class(class) => write!(f, "{}", class),
            Type::Parameterized(parameterized) => write!(f, "{}", parameterized),
            Type::Wildcard(wildcard) => write!(f, "{}", wildcard),
            Type::Variable(variable) => write!(f, "{}", variable.name),
            Type::GenericArray(array) => write!(f, "{}[]", array.component),
        }
    }
}

/// A generic class applied to type arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterizedType {
    raw: Class,
    arguments: Vec<Type>,
}

impl ParameterizedType {
    pub fn new(raw: Class, arguments: impl IntoIterator<Item = Type>) -> Self {
        Self {
            raw,
            arguments: arguments.into_iter().collect(),
        }
    }

    pub fn raw(&self) -> &Class {
        &self.raw
    }

    pub fn arguments(&self) -> &[Type] {
        &self.arguments
    }

    pub fn argument(&self, index: usize) -> Option<&Type> {
        self.arguments.get(index)
    }
}

impl fmt::Display for ParameterizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<", self.raw)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", argument)?;
        }
        f.write_str(">")
    }
}

/// A wildcard type argument
///
/// An unbounded wildcard carries the universal top type as its only upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WildcardType {
    upper_bounds: Vec<Type>,
    lower_bounds: Vec<Type>,
}

impl WildcardType {
    /// `?`
    pub fn unbounded() -> Self {
        Self {
            upper_bounds: vec![Type::Class(Class::object())],
            lower_bounds: Vec::new(),
        }
    }

    /// `? extends bound`
    pub fn extends(bound: impl Into<Type>) -> Self {
        Self {
            upper_bounds: vec![bound.into()],
            lower_bounds: Vec::new(),
        }
    }

    /// `? super bound`
    pub fn super_of(bound: impl Into<Type>) -> Self {
        Self {
            upper_bounds: vec![Type::Class(Class::object())],
            lower_bounds: vec![bound.into()],
        }
    }

    /// A wildcard with arbitrary bounds
    pub fn with_bounds(upper_bounds: Vec<Type>, lower_bounds: Vec<Type>) -> Self {
        Self {
            upper_bounds,
            lower_bounds,
        }
    }

    pub fn upper_bounds(&self) -> &[Type] {
        &self.upper_bounds
    }

    pub fn lower_bounds(&self) -> &[Type] {
        &self.lower_bounds
    }
}

impl fmt::Display for WildcardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(lower) = lower_bound(self) {
            return write!(f, "? super {}", lower);
        }
        match explicit_bound(self) {
            Some(upper) => write!(f, "? extends {}", upper),
            None => f.write_str("?"),
        }
    }
}

/// A named type variable, bound to the generic construct that declares it
#[derive(Debug, Clone)]
pub struct TypeVariable {
    name: String,
    declared_by: String,
    bounds: Vec<Type>,
}

impl TypeVariable {
    pub fn new(declared_by: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_by: declared_by.into(),
            bounds: Vec::new(),
        }
    }

    pub fn with_bound(mut self, bound: impl Into<Type>) -> Self {
        self.bounds.push(bound.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the class or method declaring this variable
    pub fn declared_by(&self) -> &str {
        &self.declared_by
    }

    pub fn bounds(&self) -> &[Type] {
        &self.bounds
    }
}

impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.declared_by == other.declared_by
    }
}

impl Eq for TypeVariable {}

impl Hash for TypeVariable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.declared_by.hash(state);
    }
}

/// An array of a generic component type, e.g. `T[]` or `Vec<String>[]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericArrayType {
    component: Box<Type>,
}

impl GenericArrayType {
    pub fn new(component: impl Into<Type>) -> Self {
        Self {
            component: Box::new(component.into()),
        }
    }

    pub fn component(&self) -> &Type {
        &self.component
    }
}

/// Reduce a type to the single class that represents it.
///
/// Parameterized types yield their raw class, wildcards the raw type of their
/// bound (the top type when unbounded). Type variables and generic arrays cannot
/// be reduced without more context.
pub fn raw_type(ty: &Type) -> Option<Class> {
    struct RawTypeVisitor;

    impl TypeVisitor for RawTypeVisitor {
        type Output = Option<Class>;

        fn visit_class(&mut self, class: &Class) -> crate::Result<Self::Output> {
            Ok(Some(class.clone()))
        }

        fn visit_parameterized(&mut self, ty: &ParameterizedType) -> crate::Result<Self::Output> {
            Ok(Some(ty.raw().clone()))
        }

        fn visit_wildcard(&mut self, ty: &WildcardType) -> crate::Result<Self::Output> {
            match bound(ty) {
                Some(bound) => accept(&bound, self),
                None => Ok(Some(Class::object())),
            }
        }

        fn visit_variable(&mut self, _ty: &TypeVariable) -> crate::Result<Self::Output> {
            Ok(None)
        }

        fn visit_generic_array(&mut self, _ty: &GenericArrayType) -> crate::Result<Self::Output> {
            Ok(None)
        }
    }

    accept(ty, &mut RawTypeVisitor).ok().flatten()
}

/// The lower bound of a wildcard, present only if exactly one was declared
pub fn lower_bound(wildcard: &WildcardType) -> Option<Type> {
    match wildcard.lower_bounds() {
        [bound] => Some(bound.clone()),
        _ => None,
    }
}

/// The upper bound of a wildcard, present only if exactly one was declared
pub fn only_upper_bound(wildcard: &WildcardType) -> Option<Type> {
    match wildcard.upper_bounds() {
        [bound] => Some(bound.clone()),
        _ => None,
    }
}

/// The lower bound if present, else the sole upper bound (which may be the top type)
pub fn bound(wildcard: &WildcardType) -> Option<Type> {
    lower_bound(wildcard).or_else(|| only_upper_bound(wildcard))
}

/// Like [`bound`], but an upper bound equal to the top type counts as absent
pub fn explicit_bound(wildcard: &WildcardType) -> Option<Type> {
    lower_bound(wildcard).or_else(|| {
        only_upper_bound(wildcard).filter(|upper| upper.as_class() != Some(&Class::object()))
    })
}
