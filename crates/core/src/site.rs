//! Stubbing sites
//!
//! A [`StubbingSite`] describes where a value is being produced. Sites form an
//! immutable, reference-counted ancestry chain: every nested resolution creates
//! a fresh child pointing at the already built site of its caller, so cycles are
//! impossible and ancestry is shared instead of copied.
//!
//! Equality and hashing are structural and include the parent, so sites can be
//! used as keys.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{
    AnnotatedElement, Constructor, Executable, Field, Method, Parameter, ParameterizedType, Type,
};

/// The payload of one site in the ancestry chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteKind {
    /// A root site about which nothing is known
    Unknown,
    /// A root site for a parameter injected by a test harness
    TestParameter {
        executable: Executable,
        parameter: Parameter,
    },
    ConstructorParameter {
        constructor: Constructor,
        parameter: Parameter,
    },
    MethodParameter {
        method: Method,
        parameter: Parameter,
    },
    MethodReturnValue {
        method: Method,
    },
    /// A call to a method of a generated stand-in object
    MethodInvocation {
        method: Method,
    },
    ArrayElement {
        component: Type,
    },
    ParameterizedTypeArgument {
        ty: ParameterizedType,
        index: usize,
    },
    /// Marks a memoized sub-resolution
    Memoizing,
    InjectedField {
        field: Field,
    },
}

#[derive(PartialEq, Eq, Hash)]
struct SiteNode {
    kind: SiteKind,
    parent: Option<StubbingSite>,
}

/// An immutable node describing where a value is requested
#[derive(Clone, Hash)]
pub struct StubbingSite(Arc<SiteNode>);

impl StubbingSite {
    fn new(kind: SiteKind, parent: Option<&StubbingSite>) -> Self {
        Self(Arc::new(SiteNode {
            kind,
            parent: parent.cloned(),
        }))
    }

    /// A root site without any information
    pub fn unknown() -> Self {
        Self::new(SiteKind::Unknown, None)
    }

    /// A root site for a parameter of a test function or method
    pub fn test_parameter(executable: impl Into<Executable>, parameter: &Parameter) -> Result<Self> {
        let executable = executable.into();
        ensure_parameter_of(&executable, parameter)?;
        Ok(Self::new(
            SiteKind::TestParameter {
                executable,
                parameter: parameter.clone(),
            },
            None,
        ))
    }

    pub fn constructor_parameter(
        parent: &StubbingSite,
        constructor: &Constructor,
        parameter: &Parameter,
    ) -> Result<Self> {
        ensure_parameter_of(&Executable::Constructor(constructor.clone()), parameter)?;
        Ok(Self::new(
            SiteKind::ConstructorParameter {
                constructor: constructor.clone(),
                parameter: parameter.clone(),
            },
            Some(parent),
        ))
    }

    /// Like [`constructor_parameter`](Self::constructor_parameter), looking the parameter up by index
    pub fn constructor_parameter_at(
        parent: &StubbingSite,
        constructor: &Constructor,
        index: usize,
    ) -> Result<Self> {
        let parameter = parameter_at(&Executable::Constructor(constructor.clone()), index)?;
        Self::constructor_parameter(parent, constructor, &parameter)
    }

    pub fn method_parameter(parent: &StubbingSite, method: &Method, parameter: &Parameter) -> Result<Self> {
        ensure_parameter_of(&Executable::Method(method.clone()), parameter)?;
        Ok(Self::new(
            SiteKind::MethodParameter {
                method: method.clone(),
                parameter: parameter.clone(),
            },
            Some(parent),
        ))
    }

    /// Like [`method_parameter`](Self::method_parameter), looking the parameter up by index
    pub fn method_parameter_at(parent: &StubbingSite, method: &Method, index: usize) -> Result<Self> {
        let parameter = parameter_at(&Executable::Method(method.clone()), index)?;
        Self::method_parameter(parent, method, &parameter)
    }

    pub fn method_return_value(parent: &StubbingSite, method: &Method) -> Self {
        Self::new(
            SiteKind::MethodReturnValue {
                method: method.clone(),
            },
            Some(parent),
        )
    }

    pub fn method_invocation(parent: &StubbingSite, method: &Method) -> Self {
        Self::new(
            SiteKind::MethodInvocation {
                method: method.clone(),
            },
            Some(parent),
        )
    }

    pub fn array_element(parent: &StubbingSite, component: impl Into<Type>) -> Self {
        Self::new(
            SiteKind::ArrayElement {
                component: component.into(),
            },
            Some(parent),
        )
    }

    /// Site of the `index`th type argument of `ty`
    pub fn type_argument(parent: &StubbingSite, ty: &ParameterizedType, index: usize) -> Result<Self> {
        if index >= ty.arguments().len() {
            return Err(Error::InvalidSite(format!(
                "type argument index {} out of range for {} ({} arguments)",
                index,
                ty,
                ty.arguments().len()
            )));
        }
        Ok(Self::new(
            SiteKind::ParameterizedTypeArgument {
                ty: ty.clone(),
                index,
            },
            Some(parent),
        ))
    }

    pub fn memoizing(parent: &StubbingSite) -> Self {
        Self::new(SiteKind::Memoizing, Some(parent))
    }

    pub fn injected_field(parent: &StubbingSite, field: &Field) -> Self {
        Self::new(
            SiteKind::InjectedField {
                field: field.clone(),
            },
            Some(parent),
        )
    }

    pub fn kind(&self) -> &SiteKind {
        &self.0.kind
    }

    pub fn parent(&self) -> Option<&StubbingSite> {
        self.0.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    /// This site followed by its ancestors, innermost first
    pub fn walk(&self) -> impl Iterator<Item = &StubbingSite> {
        std::iter::successors(Some(self), |site| site.parent())
    }

    /// The annotated element this site is about, if any
    pub fn annotated_element(&self) -> Option<AnnotatedElement> {
        match &self.0.kind {
            SiteKind::TestParameter { parameter, .. }
            | SiteKind::ConstructorParameter { parameter, .. }
            | SiteKind::MethodParameter { parameter, .. } => {
                Some(AnnotatedElement::Parameter(parameter.clone()))
            }
            SiteKind::MethodReturnValue { method } | SiteKind::MethodInvocation { method } => {
                Some(AnnotatedElement::Method(method.clone()))
            }
            SiteKind::InjectedField { field } => Some(AnnotatedElement::Field(field.clone())),
            _ => None,
        }
    }

    /// The constructor or method this site belongs to, if any
    pub fn executable(&self) -> Option<Executable> {
        match &self.0.kind {
            SiteKind::TestParameter { executable, .. } => Some(executable.clone()),
            SiteKind::ConstructorParameter { constructor, .. } => {
                Some(Executable::Constructor(constructor.clone()))
            }
            SiteKind::MethodParameter { method, .. }
            | SiteKind::MethodReturnValue { method }
            | SiteKind::MethodInvocation { method } => Some(Executable::Method(method.clone())),
            _ => None,
        }
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        match &self.0.kind {
            SiteKind::ConstructorParameter { constructor, .. } => Some(constructor),
            SiteKind::TestParameter {
                executable: Executable::Constructor(constructor),
                ..
            } => Some(constructor),
            _ => None,
        }
    }

    pub fn method(&self) -> Option<&Method> {
        match &self.0.kind {
            SiteKind::MethodParameter { method, .. }
            | SiteKind::MethodReturnValue { method }
            | SiteKind::MethodInvocation { method } => Some(method),
            SiteKind::TestParameter {
                executable: Executable::Method(method),
                ..
            } => Some(method),
            _ => None,
        }
    }

    pub fn parameter(&self) -> Option<&Parameter> {
        match &self.0.kind {
            SiteKind::TestParameter { parameter, .. }
            | SiteKind::ConstructorParameter { parameter, .. }
            | SiteKind::MethodParameter { parameter, .. } => Some(parameter),
            _ => None,
        }
    }

    /// Position of the parameter this site is about
    pub fn parameter_index(&self) -> Option<usize> {
        self.parameter().map(Parameter::index)
    }

    pub fn field(&self) -> Option<&Field> {
        match &self.0.kind {
            SiteKind::InjectedField { field } => Some(field),
            _ => None,
        }
    }

    /// Name of the parameter, field or method this site is about
    pub fn name(&self) -> Option<&str> {
        match &self.0.kind {
            SiteKind::TestParameter { parameter, .. }
            | SiteKind::ConstructorParameter { parameter, .. }
            | SiteKind::MethodParameter { parameter, .. } => Some(parameter.name()),
            SiteKind::MethodReturnValue { method } | SiteKind::MethodInvocation { method } => {
                Some(method.name())
            }
            SiteKind::InjectedField { field } => Some(field.name()),
            _ => None,
        }
    }
}

impl PartialEq for StubbingSite {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for StubbingSite {}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteKind::Unknown => f.write_str("unknown"),
            SiteKind::TestParameter {
                executable,
                parameter,
            } => write!(f, "test parameter {} of {}", parameter.name(), executable),
            SiteKind::ConstructorParameter {
                constructor,
                parameter,
            } => write!(f, "parameter {} of {}", parameter.name(), constructor),
            SiteKind::MethodParameter { method, parameter } => {
                write!(f, "parameter {} of {}", parameter.name(), method)
            }
            SiteKind::MethodReturnValue { method } => write!(f, "return value of {}", method),
            SiteKind::MethodInvocation { method } => write!(f, "invocation of {}", method),
            SiteKind::ArrayElement { component } => write!(f, "element of {}[]", component),
            SiteKind::ParameterizedTypeArgument { ty, index } => {
                write!(f, "type argument {} of {}", index, ty)
            }
            SiteKind::Memoizing => f.write_str("memoized"),
            SiteKind::InjectedField { field } => write!(f, "field {}", field),
        }
    }
}

/// Prints the full ancestry, innermost site first
impl fmt::Display for StubbingSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, site) in self.walk().enumerate() {
            if i > 0 {
                f.write_str(" <- ")?;
            }
            write!(f, "{}", site.kind())?;
        }
        Ok(())
    }
}

impl fmt::Debug for StubbingSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StubbingSite({})", self)
    }
}

fn ensure_parameter_of(executable: &Executable, parameter: &Parameter) -> Result<()> {
    if executable.parameters().contains(parameter) {
        Ok(())
    } else {
        Err(Error::InvalidSite(format!(
            "{} is not a parameter of {}",
            parameter, executable
        )))
    }
}

fn parameter_at(executable: &Executable, index: usize) -> Result<Parameter> {
    executable.parameters().get(index).cloned().ok_or_else(|| {
        Error::InvalidSite(format!(
            "parameter index {} out of range for {} ({} parameters)",
            index,
            executable,
            executable.parameters().len()
        ))
    })
}
