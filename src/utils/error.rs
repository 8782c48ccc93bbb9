use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to open input {path}: {source}")]
    OpenInputError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in {path} at byte {offset}: {source}")]
    DecodeError {
        path: PathBuf,
        offset: u64,
        #[source]
        source: prost::DecodeError,
    },

    #[error("Failed to read {path} at byte {offset}: {source}")]
    ReadInputError {
        path: PathBuf,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Truncated record in {path} at byte {offset}")]
    TruncatedRecordError { path: PathBuf, offset: u64 },

    #[error("Record in {path} at byte {offset} declares {len} bytes, above the {limit} byte limit")]
    RecordTooLargeError {
        path: PathBuf,
        offset: u64,
        len: u64,
        limit: u64,
    },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to the report stream: {0}")]
    ReportError(#[source] std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to read config file {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown extension '{extension}' for output file '{file}'")]
    UnknownExtensionError { file: String, extension: String },

    #[error("Field '{field}' cannot be written as text to '{file}'")]
    FieldKindMismatchError { file: String, field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Config,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::OpenInputError { .. }
            | ConvertError::ReadInputError { .. }
            | ConvertError::DecodeError { .. }
            | ConvertError::TruncatedRecordError { .. }
            | ConvertError::RecordTooLargeError { .. } => ErrorCategory::Input,
            ConvertError::ConfigError { .. }
            | ConvertError::ConfigReadError { .. }
            | ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. }
            | ConvertError::UnknownExtensionError { .. }
            | ConvertError::FieldKindMismatchError { .. } => ErrorCategory::Config,
            ConvertError::WriteError { .. }
            | ConvertError::ReportError(_)
            | ConvertError::IoError(_) => ErrorCategory::Output,
            ConvertError::SerializationError(_) | ConvertError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Input | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Whether a per-problem error policy may skip past this error.
    /// A broken report stream fails every later problem too, so it never is.
    pub fn is_problem_local(&self) -> bool {
        match self {
            ConvertError::ReportError(_) => false,
            _ => matches!(
                self.category(),
                ErrorCategory::Output | ErrorCategory::Processing
            ),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::OpenInputError { .. } | ConvertError::ReadInputError { .. } => {
                "Check that every input path exists and is a readable file"
            }
            ConvertError::DecodeError { .. }
            | ConvertError::TruncatedRecordError { .. }
            | ConvertError::RecordTooLargeError { .. } => {
                "The input is not a complete length-delimited ContestProblem stream; re-export it"
            }
            ConvertError::ReportError(_) => {
                "Make sure stdout stays open for the whole run (e.g. do not pipe into `head`)"
            }
            ConvertError::WriteError { .. } | ConvertError::IoError(_) => {
                "Check disk space and permissions on the output root, or rerun with --on-error skip"
            }
            ConvertError::UnknownExtensionError { .. } => {
                "Mapping entries must end in .txt or .json"
            }
            ConvertError::FieldKindMismatchError { .. } => {
                "Map structured fields to a .json file instead of .txt"
            }
            ConvertError::MissingConfigError { .. } => {
                "Pass --output or set output.root in the config file"
            }
            ConvertError::ConfigReadError { .. } => {
                "Check the --config path; the file must exist and be readable"
            }
            ConvertError::ConfigError { .. }
            | ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
            ConvertError::SerializationError(_) | ConvertError::ProcessingError { .. } => {
                "Inspect the offending problem record; rerun with --verbose for details"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read the dataset: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Processing => format!("Could not convert a problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
