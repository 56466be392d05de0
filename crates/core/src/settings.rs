use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::StubberBuilder;
use crate::error::Result;
use crate::presets::Baseline;
use crate::selector;
use crate::strategies::{self, OptionalMode};
use crate::stubber::Stubber;

/// File names searched for by [`StubberSettings::find_settings_file`]
pub const SETTINGS_FILE_NAMES: [&str; 2] = [".stubr.json", "stubr.json"];

/// Declarative stubber configuration, usually read from `stubr.json`
///
/// ```json
/// { "baseline": "minimal", "collection_size": 3, "random_seed": 42 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StubberSettings {
    #[serde(default)]
    pub baseline: Baseline,
    /// Element count for standard collections and arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_mode: Option<OptionalMode>,
    /// Pick enum constants at random, reproducibly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
}

impl StubberSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&contents)?;
        tracing::debug!("Loaded stubber settings from {:?}: {:?}", path, settings);
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Nearest settings file in `start` or one of its ancestors
    pub fn find_settings_file(start: &Path) -> Option<PathBuf> {
        let mut current = start;
        loop {
            for name in SETTINGS_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = current.parent()?;
        }
    }

    /// A builder on the configured baseline, with the configured overrides added
    pub fn builder(&self) -> StubberBuilder {
        let mut builder = Stubber::builder().with_baseline(self.baseline);
        if let Some(size) = self.collection_size {
            builder = builder
                .stub_with(strategies::array(size))
                .stub_with_all(strategies::default_collections(size));
        }
        if let Some(mode) = self.optional_mode {
            builder = builder.stub_with(strategies::optional(mode));
        }
        if let Some(seed) = self.random_seed {
            builder = builder.stub_with(strategies::enum_value_with(selector::random(seed)));
        }
        builder
    }

    pub fn build(&self) -> Stubber {
        self.builder().build()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::error::Error;
    use crate::types::{Class, Type};
    use crate::value::Value;

    fn list_of_strings() -> Type {
        Type::parameterized(Class::vec(), [Type::Class(Class::string())])
    }

    #[test]
    fn test_defaults() {
        let settings = StubberSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, StubberSettings::default());
        assert_eq!(settings.baseline, Baseline::Full);
    }

    #[test]
    fn test_parse_all_fields() {
        let settings = StubberSettings::from_json_str(
            r#"{ "baseline": "minimal", "collection_size": 3, "optional_mode": "present_if_possible", "random_seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(
            settings,
            StubberSettings {
                baseline: Baseline::Minimal,
                collection_size: Some(3),
                optional_mode: Some(OptionalMode::PresentIfPossible),
                random_seed: Some(7),
            }
        );
    }

    #[test]
    fn test_invalid_json() {
        let error = StubberSettings::from_json_str(r#"{ "baseline": "everything" }"#).unwrap_err();
        assert!(matches!(error, Error::Serialization(_)));
    }

    #[test]
    fn test_collection_size_overrides_baseline() {
        let settings = StubberSettings {
            baseline: Baseline::Minimal,
            collection_size: Some(2),
            ..Default::default()
        };
        let value = settings.build().stub_root(&list_of_strings()).unwrap();
        assert_eq!(value.downcast_ref::<Vec<Value>>().map(Vec::len), Some(2));

        let array = settings
            .build()
            .stub_root(&Type::Class(Class::array_of(&Class::of::<u8>())))
            .unwrap();
        assert_eq!(array.downcast_ref::<Vec<Value>>().map(Vec::len), Some(2));
    }

    #[test]
    fn test_seeded_enums_are_reproducible() {
        let color = Class::builder("paint.Color")
            .enum_constant("RED")
            .enum_constant("GREEN")
            .enum_constant("BLUE")
            .build();
        let settings = StubberSettings {
            random_seed: Some(42),
            ..Default::default()
        };
        let pick = |stubber: &Stubber| -> Vec<String> {
            (0..8)
                .map(|_| {
                    let value = stubber.stub_root(&Type::Class(color.clone())).unwrap();
                    value.downcast_ref::<String>().cloned().unwrap_or_default()
                })
                .collect()
        };
        assert_eq!(pick(&settings.build()), pick(&settings.build()));
    }

    #[test]
    fn test_load_save_and_find() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        assert!(StubberSettings::find_settings_file(&nested).is_none_or(|found| !found.starts_with(dir.path())));

        let settings = StubberSettings {
            baseline: Baseline::Empty,
            optional_mode: Some(OptionalMode::Empty),
            ..Default::default()
        };
        let path = dir.path().join("stubr.json");
        settings.save(&path).unwrap();

        let found = StubberSettings::find_settings_file(&nested).unwrap();
        assert_eq!(found, path);
        assert_eq!(StubberSettings::load(&found).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let error = StubberSettings::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }
}
