use crate::core::emitter::Emitter;
use crate::core::problems::all_problems;
use crate::core::{RecordSource, Result, Storage};
use crate::domain::model::{ErrorPolicy, RunSummary};
use std::io::Write;
use std::path::Path;

pub struct ConversionEngine<R: RecordSource, S: Storage, W: Write> {
    source: R,
    emitter: Emitter<S, W>,
    on_error: ErrorPolicy,
}

impl<R: RecordSource, S: Storage, W: Write> ConversionEngine<R, S, W> {
    pub fn new(source: R, emitter: Emitter<S, W>) -> Self {
        Self {
            source,
            emitter,
            on_error: ErrorPolicy::default(),
        }
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn into_emitter(self) -> Emitter<S, W> {
        self.emitter
    }

    pub fn run<P: AsRef<Path>>(&mut self, inputs: &[P]) -> Result<RunSummary> {
        tracing::info!(
            "🚀 Converting {} container(s), {} mapped file(s) per problem",
            inputs.len(),
            self.emitter.mapping().len()
        );

        let mut summary = RunSummary::default();
        for problem in all_problems(&self.source, inputs) {
            let problem = problem?;
            match self.emitter.emit(&problem) {
                Ok(report) => {
                    summary.problems += 1;
                    summary.files_written += report.written.len();
                    summary.missing_fields += report.missing.len();
                }
                Err(e) if self.on_error == ErrorPolicy::Skip && e.is_problem_local() => {
                    tracing::warn!("⚠️ Skipping problem {:?}: {}", problem.name, e);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "✅ Converted {} problem(s), wrote {} file(s), {} missing field(s), {} skipped",
            summary.problems,
            summary.files_written,
            summary.missing_fields,
            summary.skipped
        );
        Ok(summary)
    }
}
