use crate::utils::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Name of the derived field holding the merged training/test bundle.
pub const INPUT_OUTPUTS_FIELD: &str = "input_outputs";

/// Field names holding `{input, output}` pair lists, in training-then-test order.
pub const PUBLIC_TESTS_FIELD: &str = "publicTests";
pub const GENERATED_TESTS_FIELD: &str = "generatedTests";
pub const PRIVATE_TESTS_FIELD: &str = "privateTests";
pub const TEST_CASE_FIELDS: [&str; 3] = [
    PUBLIC_TESTS_FIELD,
    PRIVATE_TESTS_FIELD,
    GENERATED_TESTS_FIELD,
];

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Json(Value),
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Json(value) => value.clone(),
        }
    }

    /// Raw text for `.txt` files. Only textual values qualify.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Json(Value::String(text)) => Some(text),
            FieldValue::Json(_) => None,
        }
    }
}

/// Name-addressable view of one problem, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemFields {
    fields: Vec<(String, FieldValue)>,
}

impl ProblemFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Replaces the value in place, or appends when the field is new.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseBundle {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_set_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_set_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Json,
}

impl FileKind {
    pub const ALLOWED_EXTENSIONS: [&'static str; 2] = ["txt", "json"];

    pub fn from_file_name(file: &str) -> Result<Self> {
        let extension = Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        match extension {
            "txt" => Ok(FileKind::Text),
            "json" => Ok(FileKind::Json),
            other => Err(ConvertError::UnknownExtensionError {
                file: file.to_string(),
                extension: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub file: String,
    pub field: String,
    pub kind: FileKind,
}

impl MappingEntry {
    pub fn new(file: impl Into<String>, field: impl Into<String>) -> Result<Self> {
        let file = file.into();
        let kind = FileKind::from_file_name(&file)?;
        Ok(Self {
            file,
            field: field.into(),
            kind,
        })
    }
}

/// Ordered table deciding which fields are written and under which file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<MappingEntry>,
}

impl FieldMapping {
    pub const DEFAULT_ENTRIES: [(&'static str, &'static str); 6] = [
        ("solutions.json", "solutions"),
        ("question.txt", "description"),
        ("public_test_cases.json", PUBLIC_TESTS_FIELD),
        ("private_test_cases.json", PRIVATE_TESTS_FIELD),
        ("generated_test_cases.json", GENERATED_TESTS_FIELD),
        ("input_output.json", INPUT_OUTPUTS_FIELD),
    ];

    pub fn from_pairs<I, F, N>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (F, N)>,
        F: Into<String>,
        N: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(file, field)| MappingEntry::new(file, field))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        let entries = Self::DEFAULT_ENTRIES
            .iter()
            .map(|(file, field)| MappingEntry {
                file: file.to_string(),
                field: field.to_string(),
                kind: if file.ends_with(".txt") {
                    FileKind::Text
                } else {
                    FileKind::Json
                },
            })
            .collect();
        Self { entries }
    }
}

/// How a problem's output directory is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum DirNaming {
    /// `"<SOURCE> <name>"`, e.g. `CODEFORCES 1548_C. The Three Little Pigs`
    #[default]
    SourceAndName,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ReshapePolicy {
    /// Keep the raw test fields and derive `input_outputs` from
    /// public + generated (training) and private (test) cases.
    #[default]
    Merged,
    /// Replace each test field in place with its `{inputs, outputs}` bundle.
    PerField,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    #[default]
    Abort,
    /// Log output/processing failures for one problem and move on.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub dir_name: String,
    pub written: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub problems: usize,
    pub skipped: usize,
    pub files_written: usize,
    pub missing_fields: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping_matches_apps_layout() {
        let mapping = FieldMapping::default();
        let files: Vec<&str> = mapping.entries().iter().map(|e| e.file.as_str()).collect();
        assert_eq!(
            files,
            vec![
                "solutions.json",
                "question.txt",
                "public_test_cases.json",
                "private_test_cases.json",
                "generated_test_cases.json",
                "input_output.json",
            ]
        );
        assert_eq!(mapping.entries()[1].kind, FileKind::Text);
        assert_eq!(
            mapping,
            FieldMapping::from_pairs(FieldMapping::DEFAULT_ENTRIES).unwrap()
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = FieldMapping::from_pairs([("question.md", "description")]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnknownExtensionError { ref extension, .. } if extension == "md"
        ));
        assert!(MappingEntry::new("solutions", "solutions").is_err());
    }

    #[test]
    fn test_problem_fields_insert_replaces_in_place() {
        let mut fields = ProblemFields::new();
        fields.insert("name", FieldValue::Text("A".to_string()));
        fields.insert("publicTests", FieldValue::Json(serde_json::json!([])));
        fields.insert("publicTests", FieldValue::Json(serde_json::json!({"inputs": []})));

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["name", "publicTests"]);
        assert_eq!(
            fields.get("publicTests"),
            Some(&FieldValue::Json(serde_json::json!({"inputs": []})))
        );
    }

    #[test]
    fn test_field_value_text_rendering() {
        assert_eq!(FieldValue::Text("desc".into()).as_text(), Some("desc"));
        assert_eq!(
            FieldValue::Json(Value::String("desc".into())).as_text(),
            Some("desc")
        );
        assert_eq!(FieldValue::Json(serde_json::json!([1])).as_text(), None);
    }
}
