use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use super::member::{
    Annotated, Annotation, Constructor, ConstructorBuilder, Field, FieldBuilder, Method,
    MethodBuilder,
};
use super::{Type, TypeVariable};
use crate::value::Value;

const PRIMITIVES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

/// What kind of class a descriptor describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassKind {
    Primitive,
    Concrete,
    Abstract,
    Interface,
    Enum,
    /// An array class with the given component
    Array(Class),
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

struct ClassInfo {
    name: String,
    kind: ClassKind,
    visibility: Visibility,
    type_parameters: Vec<String>,
    superclass: Option<Type>,
    interfaces: Vec<Type>,
    annotations: Vec<Annotation>,
    constructors: Vec<Constructor>,
    methods: Vec<Method>,
    fields: Vec<Field>,
    enum_constants: Vec<Value>,
}

/// A class descriptor
///
/// Cheap to clone. Two descriptors are equal when their qualified names are equal,
/// so a member-less [`Class::named`] reference stands in for the full descriptor
/// wherever only identity matters.
#[derive(Clone)]
pub struct Class(Arc<ClassInfo>);

impl Class {
    /// Start building a class descriptor
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder::new(name.into())
    }

    /// A member-less reference to a class by qualified name
    pub fn named(name: impl Into<String>) -> Self {
        Class::builder(name).build()
    }

    /// A member-less descriptor for a Rust type
    pub fn of<T: ?Sized>() -> Self {
        let name = std::any::type_name::<T>();
        let kind = if PRIMITIVES.contains(&name) {
            ClassKind::Primitive
        } else {
            ClassKind::Concrete
        };
        Class::builder(name).kind(kind).build()
    }

    /// The universal top type
    pub fn object() -> Self {
        static OBJECT: LazyLock<Class> = LazyLock::new(|| Class::named("object"));
        OBJECT.clone()
    }

    /// A primitive class, e.g. `Class::primitive("i32")`
    pub fn primitive(name: &str) -> Self {
        Class::builder(name).kind(ClassKind::Primitive).build()
    }

    /// The array class of the given component
    pub fn array_of(component: &Class) -> Self {
        Class::builder(format!("[{}]", component.name()))
            .kind(ClassKind::Array(component.clone()))
            .build()
    }

    pub fn string() -> Self {
        static STRING: LazyLock<Class> = LazyLock::new(Class::of::<String>);
        STRING.clone()
    }

    pub fn vec() -> Self {
        static VEC: LazyLock<Class> = LazyLock::new(|| generic("alloc::vec::Vec", &["T"]));
        VEC.clone()
    }

    pub fn vec_deque() -> Self {
        static VEC_DEQUE: LazyLock<Class> = LazyLock::new(|| {
            generic("alloc::collections::vec_deque::VecDeque", &["T"])
        });
        VEC_DEQUE.clone()
    }

    pub fn hash_set() -> Self {
        static HASH_SET: LazyLock<Class> =
            LazyLock::new(|| generic("std::collections::hash::set::HashSet", &["T"]));
        HASH_SET.clone()
    }

    pub fn btree_set() -> Self {
        static BTREE_SET: LazyLock<Class> =
            LazyLock::new(|| generic("alloc::collections::btree::set::BTreeSet", &["T"]));
        BTREE_SET.clone()
    }

    pub fn hash_map() -> Self {
        static HASH_MAP: LazyLock<Class> =
            LazyLock::new(|| generic("std::collections::hash::map::HashMap", &["K", "V"]));
        HASH_MAP.clone()
    }

    pub fn btree_map() -> Self {
        static BTREE_MAP: LazyLock<Class> =
            LazyLock::new(|| generic("alloc::collections::btree::map::BTreeMap", &["K", "V"]));
        BTREE_MAP.clone()
    }

    pub fn option() -> Self {
        static OPTION: LazyLock<Class> =
            LazyLock::new(|| generic("core::option::Option", &["T"]));
        OPTION.clone()
    }

    /// Qualified name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Name without its module path
    pub fn simple_name(&self) -> &str {
        simple_name(&self.0.name)
    }

    pub fn kind(&self) -> &ClassKind {
        &self.0.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.0.visibility
    }

    pub fn is_primitive(&self) -> bool {
        self.0.kind == ClassKind::Primitive
    }

    pub fn is_interface(&self) -> bool {
        self.0.kind == ClassKind::Interface
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.0.kind, ClassKind::Abstract | ClassKind::Interface)
    }

    pub fn is_enum(&self) -> bool {
        self.0.kind == ClassKind::Enum
    }

    pub fn is_array(&self) -> bool {
        matches!(self.0.kind, ClassKind::Array(_))
    }

    /// Component class if this is an array class
    pub fn component_type(&self) -> Option<&Class> {
        match &self.0.kind {
            ClassKind::Array(component) => Some(component),
            _ => None,
        }
    }

    pub fn type_parameters(&self) -> &[String] {
        &self.0.type_parameters
    }

    /// Type variables declared by this class, in declaration order
    pub fn type_variables(&self) -> Vec<TypeVariable> {
        self.0
            .type_parameters
            .iter()
            .map(|name| TypeVariable::new(self.name(), name.as_str()))
            .collect()
    }

    pub fn superclass(&self) -> Option<&Type> {
        self.0.superclass.as_ref()
    }

    pub fn interfaces(&self) -> &[Type] {
        &self.0.interfaces
    }

    /// Direct generic supertypes: the superclass followed by the interfaces
    pub fn supertypes(&self) -> impl Iterator<Item = &Type> {
        self.0.superclass.iter().chain(self.0.interfaces.iter())
    }

    /// This class followed by every raw supertype, depth first, each visited once
    pub fn hierarchy(&self) -> Vec<Class> {
        let mut visited: Vec<Class> = Vec::new();
        let mut pending = vec![self.clone()];
        while let Some(class) = pending.pop() {
            if visited.contains(&class) {
                continue;
            }
            let supertypes: Vec<Class> = class.supertypes().filter_map(Type::raw_type).collect();
            pending.extend(supertypes.into_iter().rev());
            visited.push(class);
        }
        visited
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.0.constructors
    }

    pub fn methods(&self) -> &[Method] {
        &self.0.methods
    }

    pub fn fields(&self) -> &[Field] {
        &self.0.fields
    }

    pub fn enum_constants(&self) -> &[Value] {
        &self.0.enum_constants
    }

    /// Whether a value of `other` may be used where `self` is expected
    pub fn is_assignable_from(&self, other: &Class) -> bool {
        if self == other {
            return true;
        }
        if other.is_primitive() {
            return false;
        }
        if *self == Class::object() {
            return true;
        }
        if let (Some(expected), Some(actual)) = (self.component_type(), other.component_type()) {
            return !expected.is_primitive() && expected.is_assignable_from(actual);
        }
        other
            .supertypes()
            .filter_map(|supertype| supertype.raw_type())
            .any(|supertype| self.is_assignable_from(&supertype))
    }
}

impl Annotated for Class {
    fn annotations(&self) -> &[Annotation] {
        &self.0.annotations
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.0.name)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// Builder for [`Class`] descriptors
pub struct ClassBuilder {
    info: ClassInfo,
}

impl ClassBuilder {
    fn new(name: String) -> Self {
        Self {
            info: ClassInfo {
                name,
                kind: ClassKind::Concrete,
                visibility: Visibility::Public,
                type_parameters: Vec::new(),
                superclass: None,
                interfaces: Vec::new(),
                annotations: Vec::new(),
                constructors: Vec::new(),
                methods: Vec::new(),
                fields: Vec::new(),
                enum_constants: Vec::new(),
            },
        }
    }

    pub fn kind(mut self, kind: ClassKind) -> Self {
        self.info.kind = kind;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.info.visibility = visibility;
        self
    }

    /// Declare a type parameter; it is referenced as `Type::variable(class_name, name)`
    pub fn type_parameter(mut self, name: impl Into<String>) -> Self {
        self.info.type_parameters.push(name.into());
        self
    }

    pub fn superclass(mut self, superclass: impl Into<Type>) -> Self {
        self.info.superclass = Some(superclass.into());
        self
    }

    pub fn interface(mut self, interface: impl Into<Type>) -> Self {
        self.info.interfaces.push(interface.into());
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.info.annotations.push(annotation);
        self
    }

    /// Declare a constructor
    pub fn constructor<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut ConstructorBuilder),
    {
        let mut builder = ConstructorBuilder::new(&self.info.name);
        configure(&mut builder);
        self.info.constructors.push(builder.build());
        self
    }

    /// Declare a method
    pub fn method<F>(mut self, name: impl Into<String>, return_type: impl Into<Type>, configure: F) -> Self
    where
        F: FnOnce(&mut MethodBuilder),
    {
        let mut builder = MethodBuilder::new(&self.info.name, name.into(), return_type.into());
        configure(&mut builder);
        self.info.methods.push(builder.build());
        self
    }

    /// Declare a field
    pub fn field<F>(mut self, name: impl Into<String>, ty: impl Into<Type>, configure: F) -> Self
    where
        F: FnOnce(&mut FieldBuilder),
    {
        let mut builder = FieldBuilder::new(&self.info.name, name.into(), ty.into());
        configure(&mut builder);
        self.info.fields.push(builder.build());
        self
    }

    /// Add an enum constant; also marks the class as an enum
    pub fn enum_constant(mut self, constant: impl Into<Value>) -> Self {
        self.info.kind = ClassKind::Enum;
        self.info.enum_constants.push(constant.into());
        self
    }

    pub fn build(self) -> Class {
        Class(Arc::new(self.info))
    }
}

fn generic(name: &str, parameters: &[&str]) -> Class {
    parameters
        .iter()
        .fold(Class::builder(name).kind(ClassKind::Interface), |builder, parameter| {
            builder.type_parameter(*parameter)
        })
        .build()
}

pub(crate) fn simple_name(name: &str) -> &str {
    let end = name.find('<').unwrap_or(name.len());
    let path = &name[..end];
    let start = path
        .rfind(|c: char| c == '.' || c == ':')
        .map(|i| i + 1)
        .unwrap_or(0);
    &path[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal() -> Class {
        Class::builder("zoo.Animal").kind(ClassKind::Abstract).build()
    }

    fn dog() -> Class {
        Class::builder("zoo.Dog")
            .superclass(animal())
            .interface(Type::parameterized(
                Class::named("zoo.Comparable"),
                [Type::Class(Class::named("zoo.Dog"))],
            ))
            .build()
    }

    #[test]
    fn test_equality_by_name() {
        assert_eq!(dog(), Class::named("zoo.Dog"));
        assert_ne!(dog(), animal());
    }

    #[test]
    fn test_primitive_detection() {
        assert!(Class::of::<i32>().is_primitive());
        assert!(Class::of::<bool>().is_primitive());
        assert!(!Class::of::<String>().is_primitive());
        assert_eq!(Class::of::<i32>(), Class::primitive("i32"));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(Class::string().simple_name(), "String");
        assert_eq!(Class::named("zoo.Dog").simple_name(), "Dog");
        assert_eq!(simple_name("alloc::vec::Vec<i32>"), "Vec");
        assert_eq!(simple_name("i32"), "i32");
    }

    #[test]
    fn test_assignability() {
        assert!(animal().is_assignable_from(&dog()));
        assert!(!dog().is_assignable_from(&animal()));
        assert!(Class::named("zoo.Comparable").is_assignable_from(&dog()));
        assert!(Class::object().is_assignable_from(&dog()));
        assert!(!Class::object().is_assignable_from(&Class::primitive("i32")));
        assert!(Class::primitive("i32").is_assignable_from(&Class::primitive("i32")));
    }

    #[test]
    fn test_array_assignability() {
        let animals = Class::array_of(&animal());
        let dogs = Class::array_of(&dog());
        assert!(animals.is_assignable_from(&dogs));
        assert!(!dogs.is_assignable_from(&animals));

        let ints = Class::array_of(&Class::primitive("i32"));
        let longs = Class::array_of(&Class::primitive("i64"));
        assert!(!ints.is_assignable_from(&longs));
        assert_eq!(ints.component_type(), Some(&Class::primitive("i32")));
    }

    #[test]
    fn test_enum_constants() {
        let color = Class::builder("paint.Color")
            .enum_constant("RED")
            .enum_constant("GREEN")
            .build();
        assert!(color.is_enum());
        assert_eq!(color.enum_constants().len(), 2);
    }

    #[test]
    fn test_hierarchy_visits_each_class_once() {
        let named = Class::builder("demo.Named").kind(ClassKind::Interface).build();
        let base = Class::builder("demo.Base").interface(named.clone()).build();
        let person = Class::builder("demo.Person")
            .superclass(base.clone())
            .interface(named.clone())
            .build();
        let names: Vec<String> = person.hierarchy().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, ["demo.Person", "demo.Base", "demo.Named"]);
    }

    #[test]
    fn test_type_variables() {
        let vars = Class::hash_map().type_variables();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].name(), "K");
        assert_eq!(vars[1].declared_by(), Class::hash_map().name());
    }
}
