use serde::{Deserialize, Serialize};

use crate::context::StubbingContext;
use crate::error::{Error, Result};
use crate::site::StubbingSite;
use crate::strategy::StubbingStrategy;
use crate::strategies::unwrap_wildcards;
use crate::types::{Class, Type};
use crate::value::Value;

/// How optional values are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalMode {
    /// Always `None`
    Empty,
    /// Always `Some`; fails when the element cannot be stubbed
    #[default]
    Present,
    /// `Some` when the element can be stubbed, `None` otherwise
    PresentIfPossible,
}

impl OptionalMode {
    fn allows_empty(self) -> bool {
        self != OptionalMode::Present
    }
}

/// Produces `Option<T>` requests as `Option<Value>`
pub struct OptionalStrategy {
    mode: OptionalMode,
}

impl OptionalStrategy {
    pub fn new(mode: OptionalMode) -> Self {
        Self { mode }
    }
}

impl StubbingStrategy for OptionalStrategy {
    fn accepts(&self, _context: &StubbingContext, ty: &Type) -> bool {
        match unwrap_wildcards(ty) {
            Some(Type::Class(class)) => class == Class::option() && self.mode.allows_empty(),
            Some(Type::Parameterized(parameterized)) => {
                *parameterized.raw() == Class::option() && parameterized.arguments().len() == 1
            }
            _ => false,
        }
    }

    fn stub(&self, context: &StubbingContext, ty: &Type) -> Result<Value> {
        let parameterized = match unwrap_wildcards(ty) {
            Some(Type::Parameterized(parameterized)) if *parameterized.raw() == Class::option() => {
                parameterized
            }
            Some(Type::Class(class)) if class == Class::option() && self.mode.allows_empty() => {
                return Ok(Value::new(None::<Value>));
            }
            _ => return Err(Error::unresolvable(ty, context.site())),
        };

        let site = StubbingSite::type_argument(context.site(), &parameterized, 0)?;
        let element = &parameterized.arguments()[0];
        let value = match self.mode {
            OptionalMode::Empty => None,
            OptionalMode::Present => Some(context.stubber().stub(element, &site)?),
            OptionalMode::PresentIfPossible => context.stubber().try_to_stub(element, &site)?,
        };
        Ok(Value::new(value))
    }
}
