//! Constructor, method, parameter and field descriptors

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::class::{Visibility, simple_name};
use super::{Class, Type, TypeVariable};
use crate::value::Value;

/// Error type returned by user-supplied invokers and setters
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type ConstructorInvoker = Arc<dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync>;
type MethodInvoker =
    Arc<dyn Fn(Option<&Value>, &[Value]) -> Result<Value, BoxError> + Send + Sync>;
type FieldSetter = Arc<dyn Fn(&Value, Value) -> Result<(), BoxError> + Send + Sync>;

/// An annotation: a qualified type name plus string attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    type_name: String,
    attributes: BTreeMap<String, String>,
}

impl Annotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.type_name)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Match against a qualified or a simple annotation name
    pub fn is_named(&self, name: &str) -> bool {
        self.type_name == name || self.simple_name() == name
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.simple_name())
    }
}

/// Anything that carries annotations
pub trait Annotated {
    fn annotations(&self) -> &[Annotation];

    /// The first annotation with the given qualified or simple name
    fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations().iter().find(|a| a.is_named(name))
    }

    fn is_annotated_with(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }
}

/// Anything with a declared parameter list
pub trait Signature {
    fn parameters(&self) -> &[Parameter];
}

impl Signature for Constructor {
    fn parameters(&self) -> &[Parameter] {
        Constructor::parameters(self)
    }
}

impl Signature for Method {
    fn parameters(&self) -> &[Parameter] {
        Method::parameters(self)
    }
}

impl Signature for Executable {
    fn parameters(&self) -> &[Parameter] {
        Executable::parameters(self)
    }
}

struct ParameterInfo {
    owner: String,
    index: usize,
    name: String,
    ty: Type,
    annotations: Vec<Annotation>,
}

/// A parameter of a constructor or method
#[derive(Clone)]
pub struct Parameter(Arc<ParameterInfo>);

impl Parameter {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn index(&self) -> usize {
        self.0.index
    }

    /// Declared (possibly generic) type
    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    /// Declared type reduced to a class
    pub fn raw_type(&self) -> Option<Class> {
        self.0.ty.raw_type()
    }

    /// Printable name of the declaring executable
    pub fn owner(&self) -> &str {
        &self.0.owner
    }
}

impl Annotated for Parameter {
    fn annotations(&self) -> &[Annotation] {
        &self.0.annotations
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.owner == other.0.owner
                && self.0.index == other.0.index
                && self.0.name == other.0.name
                && self.0.ty == other.0.ty)
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.owner.hash(state);
        self.0.index.hash(state);
        self.0.name.hash(state);
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("owner", &self.0.owner)
            .field("index", &self.0.index)
            .field("name", &self.0.name)
            .field("ty", &self.0.ty)
            .finish()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.name, self.0.ty)
    }
}

#[derive(Default)]
struct ParameterList {
    parameters: Vec<Parameter>,
}

impl ParameterList {
    fn push(&mut self, owner: &str, name: String, ty: Type, annotations: Vec<Annotation>) {
        let index = self.parameters.len();
        self.parameters.push(Parameter(Arc::new(ParameterInfo {
            owner: owner.to_string(),
            index,
            name,
            ty,
            annotations,
        })));
    }
}

fn write_parameter_types(f: &mut fmt::Formatter<'_>, parameters: &[Parameter]) -> fmt::Result {
    f.write_str("(")?;
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", parameter.ty())?;
    }
    f.write_str(")")
}

fn same_parameter_types(a: &[Parameter], b: &[Parameter]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.ty() == b.ty())
}

struct ConstructorInfo {
    declaring_class: Class,
    visibility: Visibility,
    parameters: Vec<Parameter>,
    annotations: Vec<Annotation>,
    invoker: Option<ConstructorInvoker>,
}

/// A constructor descriptor
#[derive(Clone)]
pub struct Constructor(Arc<ConstructorInfo>);

impl Constructor {
    pub fn declaring_class(&self) -> &Class {
        &self.0.declaring_class
    }

    pub fn visibility(&self) -> Visibility {
        self.0.visibility
    }

    pub fn is_public(&self) -> bool {
        self.0.visibility == Visibility::Public
    }

    /// Whether this is the no-argument constructor
    pub fn is_default(&self) -> bool {
        self.0.parameters.is_empty()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.0.parameters
    }

    pub fn parameter_types(&self) -> Vec<Type> {
        self.0.parameters.iter().map(|p| p.ty().clone()).collect()
    }

    /// Create an instance from already stubbed arguments
    pub fn new_instance(&self, arguments: &[Value]) -> Result<Value, BoxError> {
        match &self.0.invoker {
            Some(invoker) => invoker(arguments),
            None => Err(format!("constructor {} has no invoker", self).into()),
        }
    }
}

impl Annotated for Constructor {
    fn annotations(&self) -> &[Annotation] {
        &self.0.annotations
    }
}

impl PartialEq for Constructor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.declaring_class == other.0.declaring_class
                && same_parameter_types(&self.0.parameters, &other.0.parameters))
    }
}

impl Eq for Constructor {}

impl Hash for Constructor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.declaring_class.hash(state);
        self.0.parameters.len().hash(state);
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constructor({})", self)
    }
}

impl fmt::Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.declaring_class)?;
        write_parameter_types(f, &self.0.parameters)
    }
}

/// Configures a constructor declared through [`ClassBuilder::constructor`](super::ClassBuilder::constructor)
pub struct ConstructorBuilder {
    declaring_class: Class,
    owner: String,
    visibility: Visibility,
    parameters: ParameterList,
    annotations: Vec<Annotation>,
    invoker: Option<ConstructorInvoker>,
}

impl ConstructorBuilder {
    pub(super) fn new(class_name: &str) -> Self {
        Self {
            declaring_class: Class::named(class_name),
            owner: format!("{}::new", class_name),
            visibility: Visibility::Public,
            parameters: ParameterList::default(),
            annotations: Vec::new(),
            invoker: None,
        }
    }

    pub fn parameter(&mut self, name: impl Into<String>, ty: impl Into<Type>) -> &mut Self {
        self.parameters
            .push(&self.owner, name.into(), ty.into(), Vec::new());
        self
    }

    pub fn annotated_parameter(
        &mut self,
        name: impl Into<String>,
        ty: impl Into<Type>,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        self.parameters.push(
            &self.owner,
            name.into(),
            ty.into(),
            annotations.into_iter().collect(),
        );
        self
    }

    pub fn annotation(&mut self, annotation: Annotation) -> &mut Self {
        self.annotations.push(annotation);
        self
    }

    pub fn visibility(&mut self, visibility: Visibility) -> &mut Self {
        self.visibility = visibility;
        self
    }

    pub fn invoke<F>(&mut self, invoker: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.invoker = Some(Arc::new(invoker));
        self
    }

    pub(super) fn build(self) -> Constructor {
        Constructor(Arc::new(ConstructorInfo {
            declaring_class: self.declaring_class,
            visibility: self.visibility,
            parameters: self.parameters.parameters,
            annotations: self.annotations,
            invoker: self.invoker,
        }))
    }
}

struct MethodInfo {
    declaring_class: Class,
    name: String,
    visibility: Visibility,
    is_static: bool,
    type_parameters: Vec<String>,
    parameters: Vec<Parameter>,
    return_type: Type,
    annotations: Vec<Annotation>,
    invoker: Option<MethodInvoker>,
}

/// A method descriptor
#[derive(Clone)]
pub struct Method(Arc<MethodInfo>);

impl Method {
    pub fn declaring_class(&self) -> &Class {
        &self.0.declaring_class
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn visibility(&self) -> Visibility {
        self.0.visibility
    }

    pub fn is_public(&self) -> bool {
        self.0.visibility == Visibility::Public
    }

    pub fn is_static(&self) -> bool {
        self.0.is_static
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.0.parameters
    }

    pub fn parameter_types(&self) -> Vec<Type> {
        self.0.parameters.iter().map(|p| p.ty().clone()).collect()
    }

    /// Declared (possibly generic) return type
    pub fn return_type(&self) -> &Type {
        &self.0.return_type
    }

    /// Type variables declared by this method itself
    pub fn type_variables(&self) -> Vec<TypeVariable> {
        let owner = self.qualified_name();
        self.0
            .type_parameters
            .iter()
            .map(|name| TypeVariable::new(owner.as_str(), name.as_str()))
            .collect()
    }

    /// `Class::method`, also the `declared_by` of the method's type variables
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.0.declaring_class, self.0.name)
    }

    /// Call the method; `receiver` is `None` for static methods
    pub fn invoke(&self, receiver: Option<&Value>, arguments: &[Value]) -> Result<Value, BoxError> {
        match &self.0.invoker {
            Some(invoker) => invoker(receiver, arguments),
            None => Err(format!("method {} has no invoker", self).into()),
        }
    }
}

impl Annotated for Method {
    fn annotations(&self) -> &[Annotation] {
        &self.0.annotations
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.declaring_class == other.0.declaring_class
                && self.0.name == other.0.name
                && same_parameter_types(&self.0.parameters, &other.0.parameters))
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.declaring_class.hash(state);
        self.0.name.hash(state);
        self.0.parameters.len().hash(state);
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({})", self)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.0.declaring_class, self.0.name)?;
        write_parameter_types(f, &self.0.parameters)
    }
}

/// Configures a method declared through [`ClassBuilder::method`](super::ClassBuilder::method)
pub struct MethodBuilder {
    declaring_class: Class,
    owner: String,
    name: String,
    visibility: Visibility,
    is_static: bool,
    type_parameters: Vec<String>,
    parameters: ParameterList,
    return_type: Type,
    annotations: Vec<Annotation>,
    invoker: Option<MethodInvoker>,
}

impl MethodBuilder {
    pub(super) fn new(class_name: &str, name: String, return_type: Type) -> Self {
        Self {
            declaring_class: Class::named(class_name),
            owner: format!("{}::{}", class_name, name),
            name,
            visibility: Visibility::Public,
            is_static: false,
            type_parameters: Vec::new(),
            parameters: ParameterList::default(),
            return_type,
            annotations: Vec::new(),
            invoker: None,
        }
    }

    pub fn parameter(&mut self, name: impl Into<String>, ty: impl Into<Type>) -> &mut Self {
        self.parameters
            .push(&self.owner, name.into(), ty.into(), Vec::new());
        self
    }

    pub fn annotated_parameter(
        &mut self,
        name: impl Into<String>,
        ty: impl Into<Type>,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        self.parameters.push(
            &self.owner,
            name.into(),
            ty.into(),
            annotations.into_iter().collect(),
        );
        self
    }

    /// Declare a method type parameter, referenced as `Type::variable("Class::method", name)`
    pub fn type_parameter(&mut self, name: impl Into<String>) -> &mut Self {
        self.type_parameters.push(name.into());
        self
    }

    pub fn annotation(&mut self, annotation: Annotation) -> &mut Self {
        self.annotations.push(annotation);
        self
    }

    pub fn visibility(&mut self, visibility: Visibility) -> &mut Self {
        self.visibility = visibility;
        self
    }

    pub fn set_static(&mut self, is_static: bool) -> &mut Self {
        self.is_static = is_static;
        self
    }

    pub fn invoke<F>(&mut self, invoker: F) -> &mut Self
    where
        F: Fn(Option<&Value>, &[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.invoker = Some(Arc::new(invoker));
        self
    }

    pub(super) fn build(self) -> Method {
        Method(Arc::new(MethodInfo {
            declaring_class: self.declaring_class,
            name: self.name,
            visibility: self.visibility,
            is_static: self.is_static,
            type_parameters: self.type_parameters,
            parameters: self.parameters.parameters,
            return_type: self.return_type,
            annotations: self.annotations,
            invoker: self.invoker,
        }))
    }
}

struct FieldInfo {
    declaring_class: Class,
    name: String,
    ty: Type,
    visibility: Visibility,
    is_static: bool,
    annotations: Vec<Annotation>,
    setter: Option<FieldSetter>,
}

/// A field descriptor
#[derive(Clone)]
pub struct Field(Arc<FieldInfo>);

impl Field {
    pub fn declaring_class(&self) -> &Class {
        &self.0.declaring_class
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    pub fn visibility(&self) -> Visibility {
        self.0.visibility
    }

    pub fn is_static(&self) -> bool {
        self.0.is_static
    }

    pub fn is_settable(&self) -> bool {
        self.0.setter.is_some()
    }

    /// Store `value` into this field of `target`
    pub fn set(&self, target: &Value, value: Value) -> Result<(), BoxError> {
        match &self.0.setter {
            Some(setter) => setter(target, value),
            None => Err(format!("field {} has no setter", self).into()),
        }
    }
}

impl Annotated for Field {
    fn annotations(&self) -> &[Annotation] {
        &self.0.annotations
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.declaring_class == other.0.declaring_class && self.0.name == other.0.name)
    }
}

impl Eq for Field {}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.declaring_class.hash(state);
        self.0.name.hash(state);
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({})", self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0.declaring_class, self.0.name)
    }
}

/// Configures a field declared through [`ClassBuilder::field`](super::ClassBuilder::field)
pub struct FieldBuilder {
    info: FieldInfo,
}

impl FieldBuilder {
    pub(super) fn new(class_name: &str, name: String, ty: Type) -> Self {
        Self {
            info: FieldInfo {
                declaring_class: Class::named(class_name),
                name,
                ty,
                visibility: Visibility::Private,
                is_static: false,
                annotations: Vec::new(),
                setter: None,
            },
        }
    }

    pub fn annotation(&mut self, annotation: Annotation) -> &mut Self {
        self.info.annotations.push(annotation);
        self
    }

    pub fn visibility(&mut self, visibility: Visibility) -> &mut Self {
        self.info.visibility = visibility;
        self
    }

    pub fn set_static(&mut self, is_static: bool) -> &mut Self {
        self.info.is_static = is_static;
        self
    }

    pub fn setter<F>(&mut self, setter: F) -> &mut Self
    where
        F: Fn(&Value, Value) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.info.setter = Some(Arc::new(setter));
        self
    }

    pub(super) fn build(self) -> Field {
        Field(Arc::new(self.info))
    }
}

/// A constructor or a method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Executable {
    Constructor(Constructor),
    Method(Method),
}

impl Executable {
    pub fn declaring_class(&self) -> &Class {
        match self {
            Executable::Constructor(constructor) => constructor.declaring_class(),
            Executable::Method(method) => method.declaring_class(),
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Executable::Constructor(constructor) => constructor.parameters(),
            Executable::Method(method) => method.parameters(),
        }
    }

    pub fn parameter_types(&self) -> Vec<Type> {
        self.parameters().iter().map(|p| p.ty().clone()).collect()
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Executable::Constructor(constructor) => constructor.visibility(),
            Executable::Method(method) => method.visibility(),
        }
    }

    pub fn as_constructor(&self) -> Option<&Constructor> {
        match self {
            Executable::Constructor(constructor) => Some(constructor),
            Executable::Method(_) => None,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Executable::Method(method) => Some(method),
            Executable::Constructor(_) => None,
        }
    }
}

impl Annotated for Executable {
    fn annotations(&self) -> &[Annotation] {
        match self {
            Executable::Constructor(constructor) => constructor.annotations(),
            Executable::Method(method) => method.annotations(),
        }
    }
}

impl fmt::Display for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Executable::Constructor(constructor) => write!(f, "{}", constructor),
            Executable::Method(method) => write!(f, "{}", method),
        }
    }
}

impl From<Constructor> for Executable {
    fn from(constructor: Constructor) -> Self {
        Executable::Constructor(constructor)
    }
}

impl From<Method> for Executable {
    fn from(method: Method) -> Self {
        Executable::Method(method)
    }
}

/// Any descriptor that can carry annotations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotatedElement {
    Class(Class),
    Constructor(Constructor),
    Method(Method),
    Parameter(Parameter),
    Field(Field),
}

impl Annotated for AnnotatedElement {
    fn annotations(&self) -> &[Annotation] {
        match self {
            AnnotatedElement::Class(class) => class.annotations(),
            AnnotatedElement::Constructor(constructor) => constructor.annotations(),
            AnnotatedElement::Method(method) => method.annotations(),
            AnnotatedElement::Parameter(parameter) => parameter.annotations(),
            AnnotatedElement::Field(field) => field.annotations(),
        }
    }
}

impl fmt::Display for AnnotatedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotatedElement::Class(class) => write!(f, "{}", class),
            AnnotatedElement::Constructor(constructor) => write!(f, "{}", constructor),
            AnnotatedElement::Method(method) => write!(f, "{}", method),
            AnnotatedElement::Parameter(parameter) => write!(f, "{}", parameter),
            AnnotatedElement::Field(field) => write!(f, "{}", field),
        }
    }
}

impl From<Parameter> for AnnotatedElement {
    fn from(parameter: Parameter) -> Self {
        AnnotatedElement::Parameter(parameter)
    }
}

impl From<Field> for AnnotatedElement {
    fn from(field: Field) -> Self {
        AnnotatedElement::Field(field)
    }
}

impl From<Executable> for AnnotatedElement {
    fn from(executable: Executable) -> Self {
        match executable {
            Executable::Constructor(constructor) => AnnotatedElement::Constructor(constructor),
            Executable::Method(method) => AnnotatedElement::Method(method),
        }
    }
}
