use crate::core::{ContestProblem, RecordSource, Result};
use std::path::Path;

/// Chains every container in `paths` into one forward-only problem stream.
///
/// The first open or decode failure is yielded as an `Err`, after which the
/// iterator is exhausted.
pub struct ProblemIter<'a, S: RecordSource, P> {
    source: &'a S,
    paths: std::slice::Iter<'a, P>,
    current: Option<S::Reader>,
    failed: bool,
}

pub fn all_problems<'a, S, P>(source: &'a S, paths: &'a [P]) -> ProblemIter<'a, S, P>
where
    S: RecordSource,
    P: AsRef<Path>,
{
    ProblemIter {
        source,
        paths: paths.iter(),
        current: None,
        failed: false,
    }
}

impl<S, P> Iterator for ProblemIter<'_, S, P>
where
    S: RecordSource,
    P: AsRef<Path>,
{
    type Item = Result<ContestProblem>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            if let Some(reader) = self.current.as_mut() {
                match reader.next() {
                    Some(Ok(problem)) => return Some(Ok(problem)),
                    Some(Err(e)) => {
                        self.failed = true;
                        self.current = None;
                        return Some(Err(e));
                    }
                    None => self.current = None,
                }
            }

            let path: &Path = self.paths.next()?.as_ref();
            tracing::info!("📂 Reading {}", path.display());
            match self.source.open(path) {
                Ok(reader) => self.current = Some(reader),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
