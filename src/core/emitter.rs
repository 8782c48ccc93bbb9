use crate::core::reshape::reshape_fields;
use crate::core::{ConfigProvider, ContestProblem, Result, Storage};
use crate::domain::model::{
    DirNaming, EmitReport, FieldMapping, FieldValue, FileKind, MappingEntry, ReshapePolicy,
};
use crate::utils::error::ConvertError;
use std::io::Write;
use std::path::PathBuf;

/// Writes one directory of apps-format files per problem.
///
/// Progress and missing-field notes go to `out`, one line each.
pub struct Emitter<S: Storage, W: Write> {
    storage: S,
    mapping: FieldMapping,
    naming: DirNaming,
    reshape: ReshapePolicy,
    out: W,
}

impl<S: Storage, W: Write> Emitter<S, W> {
    pub fn new(storage: S, mapping: FieldMapping, out: W) -> Self {
        Self {
            storage,
            mapping,
            naming: DirNaming::default(),
            reshape: ReshapePolicy::default(),
            out,
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C, out: W) -> Result<Self> {
        Ok(Self::new(storage, config.field_mapping()?, out)
            .with_naming(config.dir_naming())
            .with_reshape(config.reshape_policy()))
    }

    pub fn with_naming(mut self, naming: DirNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_reshape(mut self, reshape: ReshapePolicy) -> Self {
        self.reshape = reshape;
        self
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn emit(&mut self, problem: &ContestProblem) -> Result<EmitReport> {
        let dir_name = dir_name(problem, self.naming)?;
        writeln!(self.out, "{}", dir_name).map_err(ConvertError::ReportError)?;

        let dir = PathBuf::from(&dir_name);
        self.storage.create_dir_all(&dir)?;

        let mut fields = problem.to_fields();
        reshape_fields(&mut fields, self.reshape)?;

        let label = problem.source_label();
        let mut report = EmitReport {
            dir_name,
            ..Default::default()
        };

        for entry in self.mapping.entries() {
            match fields.get(&entry.field) {
                Some(value) => {
                    let data = render(entry, value)?;
                    self.storage.write_file(&dir.join(&entry.file), &data)?;
                    report.written.push(entry.file.clone());
                }
                None => {
                    writeln!(
                        self.out,
                        "problem {} {} does not have attribute {}",
                        label, problem.name, entry.field
                    )
                    .map_err(ConvertError::ReportError)?;
                    report.missing.push(entry.field.clone());
                }
            }
        }

        tracing::debug!(
            "Emitted {}: {} file(s), {} missing field(s)",
            report.dir_name,
            report.written.len(),
            report.missing.len()
        );
        Ok(report)
    }
}

fn render(entry: &MappingEntry, value: &FieldValue) -> Result<Vec<u8>> {
    match entry.kind {
        FileKind::Text => value
            .as_text()
            .map(|text| text.as_bytes().to_vec())
            .ok_or_else(|| ConvertError::FieldKindMismatchError {
                file: entry.file.clone(),
                field: entry.field.clone(),
            }),
        FileKind::Json => Ok(serde_json::to_vec(&value.to_json())?),
    }
}

/// Directory name for `problem`; path separators become `_`.
pub fn dir_name(problem: &ContestProblem, naming: DirNaming) -> Result<String> {
    let name = problem.name.replace(['/', '\\'], "_");
    if name.trim().is_empty() || name == "." || name == ".." {
        return Err(ConvertError::ProcessingError {
            message: format!(
                "{} problem has no usable name: {:?}",
                problem.source_label(),
                problem.name
            ),
        });
    }

    Ok(match naming {
        DirNaming::SourceAndName => format!("{} {}", problem.source_label(), name),
        DirNaming::Name => name,
    })
}
