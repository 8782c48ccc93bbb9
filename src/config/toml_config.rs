use crate::core::ConfigProvider;
use crate::domain::model::{DirNaming, ErrorPolicy, FieldMapping, FileKind, ReshapePolicy};
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub error_handling: ErrorHandlingConfig,
    /// Replaces the default apps-format table when present.
    pub mapping: Option<Vec<MappingConfig>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub root: Option<String>,
    #[serde(default)]
    pub naming: DirNaming,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub reshape: ReshapePolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    #[serde(default)]
    pub on_problem_error: ErrorPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    pub file: String,
    pub field: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConvertError::ConfigReadError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(root) = &self.output.root {
            validation::validate_path("output.root", root)?;
        }

        if let Some(entries) = &self.mapping {
            if entries.is_empty() {
                return Err(ConvertError::ConfigValidationError {
                    field: "mapping".to_string(),
                    message: "mapping table is empty".to_string(),
                });
            }
            let files: Vec<String> = entries.iter().map(|e| e.file.clone()).collect();
            for entry in entries {
                validation::validate_file_name("mapping.file", &entry.file)?;
                validation::validate_non_empty_string("mapping.field", &entry.field)?;
            }
            validation::validate_file_extensions(
                "mapping.file",
                &files,
                &FileKind::ALLOWED_EXTENSIONS,
            )?;
            validation::validate_unique("mapping.file", &files)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn output_root(&self) -> Option<&Path> {
        self.output.root.as_deref().map(Path::new)
    }

    fn dir_naming(&self) -> DirNaming {
        self.output.naming
    }

    fn reshape_policy(&self) -> ReshapePolicy {
        self.transform.reshape
    }

    fn error_policy(&self) -> ErrorPolicy {
        self.error_handling.on_problem_error
    }

    fn field_mapping(&self) -> Result<FieldMapping> {
        match &self.mapping {
            Some(entries) => FieldMapping::from_pairs(
                entries
                    .iter()
                    .map(|e| (e.file.as_str(), e.field.as_str())),
            ),
            None => Ok(FieldMapping::default()),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[output]
root = "./apps/train"
naming = "name"

[transform]
reshape = "per_field"

[error_handling]
on_problem_error = "skip"

[[mapping]]
file = "question.txt"
field = "description"

[[mapping]]
file = "tags.json"
field = "cfTags"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.output_root(), Some(Path::new("./apps/train")));
        assert_eq!(config.dir_naming(), DirNaming::Name);
        assert_eq!(config.reshape_policy(), ReshapePolicy::PerField);
        assert_eq!(config.error_policy(), ErrorPolicy::Skip);
        assert!(config.validate().is_ok());

        let mapping = config.field_mapping().unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.entries()[1].field, "cfTags");
        assert_eq!(mapping.entries()[1].kind, FileKind::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.output_root(), None);
        assert_eq!(config.dir_naming(), DirNaming::SourceAndName);
        assert_eq!(config.reshape_policy(), ReshapePolicy::Merged);
        assert_eq!(config.error_policy(), ErrorPolicy::Abort);
        assert_eq!(config.field_mapping().unwrap(), FieldMapping::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CODE_CONTESTS_TEST_ROOT", "/data/apps");

        let toml_content = r#"
[output]
root = "${CODE_CONTESTS_TEST_ROOT}/train"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output.root.as_deref(), Some("/data/apps/train"));

        std::env::remove_var("CODE_CONTESTS_TEST_ROOT");
    }

    #[test]
    fn test_config_validation_rejects_bad_mapping() {
        let unknown_extension = r#"
[[mapping]]
file = "question.md"
field = "description"
"#;
        let config = TomlConfig::from_toml_str(unknown_extension).unwrap();
        assert!(config.validate().is_err());
        assert!(matches!(
            config.field_mapping(),
            Err(ConvertError::UnknownExtensionError { .. })
        ));

        let duplicate = r#"
[[mapping]]
file = "question.txt"
field = "description"

[[mapping]]
file = "question.txt"
field = "untranslatedDescription"
"#;
        let config = TomlConfig::from_toml_str(duplicate).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_policy_is_a_parse_error() {
        let toml_content = r#"
[transform]
reshape = "sideways"
"#;
        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(ConvertError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[output]
root = "./out"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_root(), Some(Path::new("./out")));
    }

    #[test]
    fn test_missing_config_file_is_a_config_error() {
        let err = TomlConfig::from_file("/no/such/config.toml").unwrap_err();

        assert!(matches!(err, ConvertError::ConfigReadError { .. }));
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.user_friendly_message().contains("/no/such/config.toml"));
    }
}
