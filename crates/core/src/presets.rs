//! Ready-made strategy chains
//!
//! Each call builds fresh strategies, so stubbers created from separate calls
//! never share sequence counters or memoized values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::matcher::{annotated_site_is, methods, nullable};
use crate::strategies::{self, OptionalMode};
use crate::strategy::StubbingStrategyExt;
use crate::stubber::Stubber;
use crate::types::AnnotatedElement;

/// Stubs as much as possible with non-null values
///
/// Primitives get their zero value, enums their first constant, arrays are
/// empty, `Option`s are present and standard collections hold one element.
/// Other classes are built through their single static factory method if they
/// have one, else their single non-default constructor, else their default
/// constructor.
pub fn full() -> Stubber {
    Stubber::builder()
        .stub_with(strategies::default_value())
        .stub_with(strategies::enum_value())
        .stub_with(strategies::array(0))
        .stub_with(strategies::optional(OptionalMode::Present))
        .stub_with_all(strategies::default_collections(1))
        .stub_with(strategies::default_constructor())
        .stub_with(strategies::non_default_constructor())
        .stub_with(strategies::factory_method_matching(methods::any()))
        .stub_with(strategies::stubber())
        .stub_with_all(strategies::common_constant_values())
        .stub_with_all(strategies::common_supplied_values())
        .build()
}

/// Like [`full`], but with empty collections and `Option`s, and null where the
/// site is annotated as nullable
pub fn minimal() -> Stubber {
    Stubber::builder()
        .include(&full())
        .stub_with(strategies::null_value().when(annotated_site_is(nullable::<AnnotatedElement>())))
        .stub_with_all(strategies::empty_default_collections())
        .stub_with(strategies::optional(OptionalMode::Empty))
        .build()
}

/// A chain without strategies
pub fn empty() -> Stubber {
    Stubber::from_strategies(Vec::new())
}

/// The preset a builder falls back to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    #[default]
    Full,
    Minimal,
    Empty,
}

impl Baseline {
    pub fn stubber(self) -> Stubber {
        match self {
            Baseline::Full => full(),
            Baseline::Minimal => minimal(),
            Baseline::Empty => empty(),
        }
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Baseline::Full => "full",
            Baseline::Minimal => "minimal",
            Baseline::Empty => "empty",
        })
    }
}

impl FromStr for Baseline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Baseline::Full),
            "minimal" => Ok(Baseline::Minimal),
            "empty" => Ok(Baseline::Empty),
            other => Err(Error::Config(format!("unknown baseline '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::site::StubbingSite;
    use crate::types::{Annotation, Class, ClassKind, Type, Visibility};
    use crate::value::Value;

    #[derive(Debug)]
    struct Account {
        owner: String,
        balance: i64,
    }

    fn account() -> Class {
        Class::builder("bank.Account")
            .constructor(|c| {
                c.visibility(Visibility::Private).invoke(|_| {
                    Ok(Value::new(Account {
                        owner: "private".into(),
                        balance: -1,
                    }))
                });
            })
            .constructor(|c| {
                c.parameter("owner", Class::string())
                    .parameter("balance", Class::of::<i64>())
                    .invoke(|arguments| {
                        Ok(Value::new(Account {
                            owner: arguments[0].downcast_ref::<String>().cloned().unwrap_or_default(),
                            balance: arguments[1].downcast_ref::<i64>().copied().unwrap_or_default(),
                        }))
                    });
            })
            .build()
    }

    fn vec_of_strings() -> Type {
        Type::parameterized(Class::vec(), [Type::Class(Class::string())])
    }

    fn optional_string() -> Type {
        Type::parameterized(Class::option(), [Type::Class(Class::string())])
    }

    #[test]
    fn test_full_builds_objects() {
        let value = full().stub_root(&Type::Class(account())).unwrap();
        let account = value.downcast_ref::<Account>().unwrap();
        assert_eq!(account.owner, "");
        assert_eq!(account.balance, 0);
    }

    #[test]
    fn test_full_collections_and_options() {
        let stubber = full();
        let list = stubber.stub_root(&vec_of_strings()).unwrap();
        assert_eq!(list.downcast_ref::<Vec<Value>>().map(Vec::len), Some(1));

        let deque = Type::parameterized(Class::vec_deque(), [Type::Class(Class::of::<i32>())]);
        let value = stubber.stub_root(&deque).unwrap();
        assert_eq!(value.downcast_ref::<VecDeque<Value>>().map(VecDeque::len), Some(1));

        let option = stubber.stub_root(&optional_string()).unwrap();
        assert!(matches!(option.downcast_ref::<Option<Value>>(), Some(Some(_))));

        let array = stubber.stub_root(&Type::Class(Class::array_of(&Class::string()))).unwrap();
        assert_eq!(array.downcast_ref::<Vec<Value>>().map(Vec::len), Some(0));
    }

    #[test]
    fn test_full_enums_and_self() {
        let color = Class::builder("paint.Color")
            .enum_constant("RED")
            .enum_constant("GREEN")
            .build();
        let stubber = full();
        let value = stubber.stub_root(&Type::Class(color)).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("RED"));

        let handle = stubber.stub_root(&Type::Class(Stubber::class())).unwrap();
        assert!(handle.is::<Stubber>());
    }

    #[test]
    fn test_full_does_not_stub_interfaces() {
        let shape = Class::builder("shapes.Shape").kind(ClassKind::Interface).build();
        assert!(full().stub_root(&Type::Class(shape)).is_err());
    }

    #[test]
    fn test_minimal_overrides_full() {
        let stubber = minimal();
        let list = stubber.stub_root(&vec_of_strings()).unwrap();
        assert_eq!(list.downcast_ref::<Vec<Value>>().map(Vec::len), Some(0));

        let option = stubber.stub_root(&optional_string()).unwrap();
        assert!(matches!(option.downcast_ref::<Option<Value>>(), Some(None)));

        assert_eq!(
            stubber.stub_root(&Type::Class(Class::string())).unwrap().downcast_ref::<String>().map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn test_minimal_nulls_nullable_sites() {
        let class = Class::builder("people.Service")
            .method("greet", Class::of::<()>(), |m| {
                m.annotated_parameter("name", Class::string(), [Annotation::new("Nullable")])
                    .parameter("greeting", Class::string());
            })
            .build();
        let method = &class.methods()[0];
        let nullable = StubbingSite::test_parameter(method.clone(), &method.parameters()[0]).unwrap();
        let plain = StubbingSite::test_parameter(method.clone(), &method.parameters()[1]).unwrap();

        let stubber = minimal();
        let string = Type::Class(Class::string());
        assert!(stubber.stub(&string, &nullable).unwrap().is_null());
        assert!(!stubber.stub(&string, &plain).unwrap().is_null());
        assert!(!full().stub(&string, &nullable).unwrap().is_null());
    }

    #[test]
    fn test_empty_stubs_nothing() {
        assert!(empty().strategies().is_empty());
        assert!(empty().stub_root(&Type::Class(Class::string())).is_err());
    }

    #[test]
    fn test_every_baseline_builds() {
        assert!(Baseline::Empty.stubber().strategies().is_empty());
        assert!(!Baseline::Minimal.stubber().strategies().is_empty());
        let explicit = Stubber::builder().with_baseline(Baseline::Empty).build();
        assert!(explicit.strategies().is_empty());
    }

    #[test]
    fn test_baseline_parsing() {
        assert_eq!("full".parse::<Baseline>().unwrap(), Baseline::Full);
        assert_eq!(" Minimal ".parse::<Baseline>().unwrap(), Baseline::Minimal);
        assert_eq!("empty".parse::<Baseline>().unwrap(), Baseline::Empty);
        assert!("everything".parse::<Baseline>().is_err());
        assert_eq!(Baseline::default(), Baseline::Full);
        assert_eq!(Baseline::Minimal.to_string(), "minimal");
    }
}
