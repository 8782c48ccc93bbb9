use crate::utils::error::{ConvertError, Result};
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Output file names land directly inside a problem directory.
pub fn validate_file_name(field_name: &str, file: &str) -> Result<()> {
    validate_non_empty_string(field_name, file)?;
    if file.contains('/') || file.contains('\\') || file == "." || file == ".." {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File name must not contain path separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match Path::new(file).extension().and_then(|ext| ext.to_str()) {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(ConvertError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(ConvertError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_unique(field_name: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(ConvertError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ConvertError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.root", "./apps").is_ok());
        assert!(validate_path("output.root", "").is_err());
        assert!(validate_path("output.root", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("mapping.file", "question.txt").is_ok());
        assert!(validate_file_name("mapping.file", "../question.txt").is_err());
        assert!(validate_file_name("mapping.file", "  ").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["question.txt".to_string(), "solutions.json".to_string()];
        assert!(validate_file_extensions("mapping.file", &files, &["txt", "json"]).is_ok());

        let invalid_files = vec!["question.md".to_string()];
        assert!(
            validate_file_extensions("mapping.file", &invalid_files, &["txt", "json"]).is_err()
        );

        let no_extension = vec!["README".to_string()];
        assert!(validate_file_extensions("mapping.file", &no_extension, &["txt", "json"]).is_err());
    }

    #[test]
    fn test_validate_unique() {
        let files = vec!["a.json".to_string(), "a.json".to_string()];
        assert!(validate_unique("mapping.file", &files).is_err());
        assert!(validate_unique("mapping.file", &files[..1]).is_ok());
    }

    #[test]
    fn test_validate_required_field() {
        let root: Option<String> = None;
        assert!(matches!(
            validate_required_field("output.root", &root),
            Err(ConvertError::MissingConfigError { .. })
        ));
    }
}
