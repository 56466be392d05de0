use std::collections::HashMap;

use super::{Class, Type, TypeVariable, WildcardType, bound};

/// Substitutes type variables with the concrete types bound to them
///
/// Bindings come either from a concrete type and its generic supertypes
/// ([`TypeResolver::for_type`]) or from explicitly unifying a formal type with an
/// actual one ([`TypeResolver::bind`]).
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    bindings: HashMap<TypeVariable, Type>,
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver knowing every binding implied by `ty` and its supertypes
    pub fn for_type(ty: &Type) -> Self {
        let mut resolver = Self::new();
        resolver.collect(ty);
        resolver
    }

    /// Add the bindings that make `formal` equal to `actual`
    pub fn bind(mut self, formal: &Type, actual: &Type) -> Self {
        self.unify(formal, actual);
        self
    }

    pub fn binding(&self, variable: &TypeVariable) -> Option<&Type> {
        self.bindings.get(variable)
    }

    /// Substitute every bound variable in `ty`; unbound variables are left as they are
    pub fn resolve(&self, ty: &Type) -> Type {
        match ty {
            Type::Class(_) => ty.clone(),
            Type::Variable(variable) => self
                .bindings
                .get(variable)
                .cloned()
                .unwrap_or_else(|| ty.clone()),
            Type::Parameterized(parameterized) => Type::parameterized(
                parameterized.raw().clone(),
                parameterized.arguments().iter().map(|a| self.resolve(a)),
            ),
            Type::Wildcard(wildcard) => Type::Wildcard(WildcardType::with_bounds(
                wildcard.upper_bounds().iter().map(|b| self.resolve(b)).collect(),
                wildcard.lower_bounds().iter().map(|b| self.resolve(b)).collect(),
            )),
            Type::GenericArray(array) => match self.resolve(array.component()) {
                Type::Class(component) => Type::Class(Class::array_of(&component)),
                component => Type::generic_array(component),
            },
        }
    }

    fn collect(&mut self, ty: &Type) {
        match ty {
            Type::Class(class) => self.collect_supertypes(class),
            Type::Parameterized(parameterized) => {
                let raw = parameterized.raw();
                for (variable, argument) in raw.type_variables().into_iter().zip(parameterized.arguments()) {
                    let argument = self.resolve(argument);
                    self.bindings.insert(variable, argument);
                }
                self.collect_supertypes(raw);
            }
            Type::Wildcard(wildcard) => {
                if let Some(bound) = bound(wildcard) {
                    self.collect(&bound);
                }
            }
            Type::Variable(_) | Type::GenericArray(_) => {}
        }
    }

    fn collect_supertypes(&mut self, class: &Class) {
        for supertype in class.supertypes() {
            let supertype = self.resolve(supertype);
            self.collect(&supertype);
        }
    }

    fn unify(&mut self, formal: &Type, actual: &Type) {
        match (formal, actual) {
            (Type::Variable(variable), _) => {
                if formal != actual {
                    self.bindings.insert(variable.clone(), actual.clone());
                }
            }
            (Type::Parameterized(formal), _) => {
                if let Some(Type::Parameterized(actual)) = as_supertype(actual, formal.raw()) {
                    for (f, a) in formal.arguments().iter().zip(actual.arguments()) {
                        self.unify(f, a);
                    }
                }
            }
            (Type::GenericArray(formal), Type::GenericArray(actual)) => {
                self.unify(formal.component(), actual.component());
            }
            (Type::GenericArray(formal), Type::Class(actual)) => {
                if let Some(component) = actual.component_type() {
                    self.unify(formal.component(), &Type::Class(component.clone()));
                }
            }
            (Type::Wildcard(formal), Type::Wildcard(actual)) => {
                for (f, a) in formal.upper_bounds().iter().zip(actual.upper_bounds()) {
                    self.unify(f, a);
                }
                for (f, a) in formal.lower_bounds().iter().zip(actual.lower_bounds()) {
                    self.unify(f, a);
                }
            }
            _ => {}
        }
    }
}

/// View `ty` as its generic supertype `target`, e.g. `StringList` as `Vec<String>`
pub fn as_supertype(ty: &Type, target: &Class) -> Option<Type> {
    let raw = ty.raw_type()?;
    if raw == *target {
        return Some(ty.clone());
    }
    if !target.is_assignable_from(&raw) {
        return None;
    }
    if target.type_parameters().is_empty() {
        return Some(Type::Class(target.clone()));
    }
    let resolver = TypeResolver::for_type(ty);
    Some(Type::parameterized(
        target.clone(),
        target
            .type_variables()
            .into_iter()
            .map(|variable| resolver.resolve(&Type::Variable(variable))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassKind;

    fn boxed() -> Class {
        Class::builder("demo.Box").type_parameter("T").build()
    }

    fn t() -> Type {
        Type::variable("demo.Box", "T")
    }

    fn string_box() -> Class {
        Class::builder("demo.StringBox")
            .superclass(Type::parameterized(boxed(), [Type::Class(Class::string())]))
            .build()
    }

    /// `ListBox<U> extends Box<Vec<U>>`
    fn list_box() -> Class {
        Class::builder("demo.ListBox")
            .type_parameter("U")
            .superclass(Type::parameterized(
                boxed(),
                [Type::parameterized(
                    Class::vec(),
                    [Type::variable("demo.ListBox", "U")],
                )],
            ))
            .build()
    }

    #[test]
    fn test_resolve_through_class_hierarchy() {
        let resolver = TypeResolver::for_type(&Type::Class(string_box()));
        assert_eq!(resolver.resolve(&t()), Type::Class(Class::string()));
    }

    #[test]
    fn test_literal_and_hierarchy_bindings_agree() {
        let via_literal =
            TypeResolver::for_type(&Type::parameterized(boxed(), [Type::Class(Class::string())]))
                .resolve(&t());
        let via_hierarchy = TypeResolver::for_type(&Type::Class(string_box())).resolve(&t());
        let via_binding = TypeResolver::new()
            .bind(&t(), &Type::Class(Class::string()))
            .resolve(&t());
        assert_eq!(via_literal, via_hierarchy);
        assert_eq!(via_hierarchy, via_binding);
    }

    #[test]
    fn test_substitution_through_generic_subclass() {
        let ty = Type::parameterized(list_box(), [Type::Class(Class::primitive("i32"))]);
        let resolver = TypeResolver::for_type(&ty);
        assert_eq!(
            resolver.resolve(&t()),
            Type::parameterized(Class::vec(), [Type::Class(Class::primitive("i32"))])
        );
    }

    #[test]
    fn test_non_variable_types_are_identity() {
        let resolver = TypeResolver::for_type(&Type::Class(string_box()));
        let plain = Type::Class(Class::primitive("i64"));
        assert_eq!(resolver.resolve(&plain), plain);
        let unbound = Type::variable("demo.Other", "X");
        assert_eq!(resolver.resolve(&unbound), unbound);
    }

    #[test]
    fn test_generic_array_collapses_to_array_class() {
        let resolver = TypeResolver::new().bind(&t(), &Type::Class(Class::string()));
        assert_eq!(
            resolver.resolve(&Type::generic_array(t())),
            Type::Class(Class::array_of(&Class::string()))
        );
    }

    #[test]
    fn test_bind_against_subtype() {
        let formal = Type::parameterized(boxed(), [t()]);
        let resolver = TypeResolver::new().bind(&formal, &Type::Class(string_box()));
        assert_eq!(resolver.resolve(&t()), Type::Class(Class::string()));
    }

    #[test]
    fn test_as_supertype() {
        let iterable = Class::builder("demo.Iterable")
            .kind(ClassKind::Interface)
            .type_parameter("E")
            .build();
        let names = Class::builder("demo.Names")
            .interface(Type::parameterized(
                iterable.clone(),
                [Type::Class(Class::string())],
            ))
            .build();
        assert_eq!(
            as_supertype(&Type::Class(names.clone()), &iterable),
            Some(Type::parameterized(iterable.clone(), [Type::Class(Class::string())]))
        );
        assert_eq!(as_supertype(&Type::Class(Class::string()), &iterable), None);
    }
}
