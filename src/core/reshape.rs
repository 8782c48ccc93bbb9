//! Reshapes `[{input, output}, ...]` test data into `{inputs: [...], outputs: [...]}`.

use crate::core::Result;
use crate::domain::model::{
    FieldValue, ProblemFields, ReshapePolicy, TestCaseBundle, GENERATED_TESTS_FIELD,
    INPUT_OUTPUTS_FIELD, PRIVATE_TESTS_FIELD, PUBLIC_TESTS_FIELD, TEST_CASE_FIELDS,
};
use crate::utils::error::ConvertError;
use serde_json::Value;

impl TestCaseBundle {
    pub fn transpose<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let (inputs, outputs): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(input, output)| (input.into(), output.into()))
            .unzip();
        Self {
            inputs,
            outputs,
            train_set_size: None,
            test_set_size: None,
        }
    }

    /// Reads the protobuf JSON shape; a missing `input` or `output` key is an
    /// omitted empty string.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self::transpose(json_pairs(value)?))
    }

    /// Training cases first, then test cases, with the size of each part.
    pub fn merged(training: Vec<(String, String)>, test: Vec<(String, String)>) -> Self {
        let train_set_size = training.len();
        let test_set_size = test.len();
        let mut bundle = Self::transpose(training.into_iter().chain(test));
        bundle.train_set_size = Some(train_set_size);
        bundle.test_set_size = Some(test_set_size);
        bundle
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .map(String::as_str)
            .zip(self.outputs.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

fn json_pairs(value: &Value) -> Result<Vec<(String, String)>> {
    let items = value.as_array().ok_or_else(|| ConvertError::ProcessingError {
        message: format!("test cases must be a list, got {}", type_name(value)),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<(String, String)> {
            let object = item.as_object().ok_or_else(|| ConvertError::ProcessingError {
                message: format!("test case {} must be an object, got {}", index, type_name(item)),
            })?;
            let text = |key: &str| -> Result<String> {
                match object.get(key) {
                    None => Ok(String::new()),
                    Some(Value::String(text)) => Ok(text.clone()),
                    Some(other) => Err(ConvertError::ProcessingError {
                        message: format!(
                            "test case {} has a non-text '{}': {}",
                            index,
                            key,
                            type_name(other)
                        ),
                    }),
                }
            };
            Ok((text("input")?, text("output")?))
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn field_pairs(fields: &ProblemFields, name: &str) -> Result<Vec<(String, String)>> {
    match fields.get(name) {
        Some(value) => json_pairs(&value.to_json()),
        None => Ok(Vec::new()),
    }
}

/// Applies `policy` to the test-case fields of one problem.
pub fn reshape_fields(fields: &mut ProblemFields, policy: ReshapePolicy) -> Result<()> {
    match policy {
        ReshapePolicy::PerField => {
            for name in TEST_CASE_FIELDS {
                if let Some(value) = fields.get(name) {
                    let bundle = TestCaseBundle::from_json(&value.to_json())?;
                    fields.insert(name, FieldValue::Json(serde_json::to_value(&bundle)?));
                }
            }
        }
        ReshapePolicy::Merged => {
            let mut training = field_pairs(fields, PUBLIC_TESTS_FIELD)?;
            training.extend(field_pairs(fields, GENERATED_TESTS_FIELD)?);
            let test = field_pairs(fields, PRIVATE_TESTS_FIELD)?;

            let bundle = TestCaseBundle::merged(training, test);
            tracing::debug!(
                "Merged {} training and {} test cases",
                bundle.train_set_size.unwrap_or(0),
                bundle.test_set_size.unwrap_or(0)
            );
            fields.insert(
                INPUT_OUTPUTS_FIELD,
                FieldValue::Json(serde_json::to_value(&bundle)?),
            );
        }
    }
    Ok(())
}
