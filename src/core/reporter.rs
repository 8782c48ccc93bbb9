use crate::core::problems::all_problems;
use crate::core::{RecordSource, Result};
use crate::utils::error::ConvertError;
use std::io::Write;
use std::path::Path;

/// Prints `<SOURCE> <name>` for every problem, in iteration order.
pub fn report_names_and_sources<S, P, W>(source: &S, inputs: &[P], out: &mut W) -> Result<usize>
where
    S: RecordSource,
    P: AsRef<Path>,
    W: Write,
{
    let mut count = 0;
    for problem in all_problems(source, inputs) {
        let problem = problem?;
        writeln!(out, "{} {}", problem.source_label(), problem.name)
            .map_err(ConvertError::ReportError)?;
        count += 1;
    }
    out.flush().map_err(ConvertError::ReportError)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::delimited::{write_records, DelimitedSource};
    use crate::domain::proto::contest_problem::Source;
    use crate::domain::proto::ContestProblem;
    use tempfile::TempDir;

    fn problem(source: Source, name: &str) -> ContestProblem {
        ContestProblem {
            name: name.to_string(),
            source: source as i32,
            ..Default::default()
        }
    }

    #[test]
    fn test_reports_two_containers_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("train-00000.pb");
        let second = temp_dir.path().join("train-00001.pb");

        let mut file = std::fs::File::create(&first).unwrap();
        write_records(
            &mut file,
            &[problem(Source::Codechef, "P1"), problem(Source::Aizu, "P2")],
        )
        .unwrap();
        let mut file = std::fs::File::create(&second).unwrap();
        write_records(
            &mut file,
            &[
                problem(Source::Codeforces, "P3"),
                problem(Source::Atcoder, "P4"),
                problem(Source::UnknownSource, "P5"),
            ],
        )
        .unwrap();

        let mut out = Vec::new();
        let count =
            report_names_and_sources(&DelimitedSource::new(), &[first, second], &mut out).unwrap();

        assert_eq!(count, 5);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "CODECHEF P1\nAIZU P2\nCODEFORCES P3\nATCODER P4\nUNKNOWN_SOURCE P5\n"
        );
    }

    #[test]
    fn test_missing_input_propagates() {
        let mut out = Vec::new();
        let result = report_names_and_sources(
            &DelimitedSource::new(),
            &["/no/such/train.pb"],
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
