//! Record container made of varint length-prefixed `ContestProblem` messages,
//! the framing written by `prost::Message::encode_length_delimited`.

use crate::domain::ports::RecordSource;
use crate::domain::proto::ContestProblem;
use crate::utils::error::{ConvertError, Result};
use prost::Message;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Upper bound on a single record; larger prefixes almost always mean the
/// file is not in this format.
pub const DEFAULT_MAX_RECORD_LEN: u64 = 1 << 30;

const MAX_VARINT_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct DelimitedSource {
    max_record_len: u64,
}

impl DelimitedSource {
    pub fn new() -> Self {
        Self {
            max_record_len: DEFAULT_MAX_RECORD_LEN,
        }
    }

    pub fn with_max_record_len(mut self, max_record_len: u64) -> Self {
        self.max_record_len = max_record_len;
        self
    }
}

impl Default for DelimitedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for DelimitedSource {
    type Reader = DelimitedReader<BufReader<File>>;

    fn open(&self, path: &Path) -> Result<Self::Reader> {
        let file = File::open(path).map_err(|source| ConvertError::OpenInputError {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Opened record container {}", path.display());

        Ok(DelimitedReader::new(path, BufReader::new(file))
            .with_max_record_len(self.max_record_len))
    }
}

pub struct DelimitedReader<R> {
    path: PathBuf,
    inner: R,
    offset: u64,
    max_record_len: u64,
    done: bool,
}

impl<R: Read> DelimitedReader<R> {
    pub fn new(path: impl Into<PathBuf>, inner: R) -> Self {
        Self {
            path: path.into(),
            inner,
            offset: 0,
            max_record_len: DEFAULT_MAX_RECORD_LEN,
            done: false,
        }
    }

    pub fn with_max_record_len(mut self, max_record_len: u64) -> Self {
        self.max_record_len = max_record_len;
        self
    }

    fn read_error(&self, source: io::Error) -> ConvertError {
        ConvertError::ReadInputError {
            path: self.path.clone(),
            offset: self.offset,
            source,
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.read_error(e)),
            }
        }
    }

    /// `Ok(None)` only at a clean record boundary.
    fn read_len(&mut self, start: u64) -> Result<Option<u64>> {
        let mut prefix = Vec::with_capacity(MAX_VARINT_LEN);
        loop {
            match self.read_byte()? {
                None if prefix.is_empty() => return Ok(None),
                None => {
                    return Err(ConvertError::TruncatedRecordError {
                        path: self.path.clone(),
                        offset: start,
                    })
                }
                Some(byte) => {
                    prefix.push(byte);
                    if byte < 0x80 || prefix.len() == MAX_VARINT_LEN {
                        break;
                    }
                }
            }
        }

        let len = prost::encoding::decode_varint(&mut prefix.as_slice()).map_err(|source| {
            ConvertError::DecodeError {
                path: self.path.clone(),
                offset: start,
                source,
            }
        })?;
        self.offset += prefix.len() as u64;
        Ok(Some(len))
    }

    fn read_record(&mut self) -> Result<Option<ContestProblem>> {
        let start = self.offset;
        let Some(len) = self.read_len(start)? else {
            return Ok(None);
        };
        if len > self.max_record_len {
            return Err(ConvertError::RecordTooLargeError {
                path: self.path.clone(),
                offset: start,
                len,
                limit: self.max_record_len,
            });
        }

        let mut body = vec![0u8; len as usize];
        self.inner.read_exact(&mut body).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => ConvertError::TruncatedRecordError {
                path: self.path.clone(),
                offset: start,
            },
            _ => self.read_error(e),
        })?;
        self.offset += len;

        let problem =
            ContestProblem::decode(body.as_slice()).map_err(|source| ConvertError::DecodeError {
                path: self.path.clone(),
                offset: start,
                source,
            })?;
        Ok(Some(problem))
    }
}

impl<R: Read> Iterator for DelimitedReader<R> {
    type Item = Result<ContestProblem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(problem)) => Some(Ok(problem)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Writes problems in the framing `DelimitedReader` expects.
pub fn write_records<'a, W, I>(writer: &mut W, problems: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ContestProblem>,
{
    let mut count = 0;
    for problem in problems {
        writer.write_all(&problem.encode_length_delimited_to_vec())?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn problem(name: &str) -> ContestProblem {
        ContestProblem {
            name: name.to_string(),
            description: format!("{name} description"),
            ..Default::default()
        }
    }

    fn encoded(problems: &[ContestProblem]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_records(&mut buf, problems).unwrap();
        buf
    }

    #[test]
    fn test_reads_records_in_file_order() {
        let bytes = encoded(&[problem("A"), problem("B"), problem("C")]);
        let names: Vec<String> = DelimitedReader::new("mem", Cursor::new(bytes))
            .map(|p| p.unwrap().name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_container_yields_nothing() {
        let mut reader = DelimitedReader::new("mem", Cursor::new(Vec::new()));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_truncated_body_is_an_error_and_fuses() {
        let mut bytes = encoded(&[problem("A"), problem("B")]);
        bytes.truncate(bytes.len() - 3);

        let mut reader = DelimitedReader::new("train.pb", Cursor::new(bytes));
        assert_eq!(reader.next().unwrap().unwrap().name, "A");
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, ConvertError::TruncatedRecordError { offset, .. } if offset > 0));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_truncated_length_prefix() {
        let mut reader = DelimitedReader::new("mem", Cursor::new(vec![0x80u8]));
        assert!(matches!(
            reader.next(),
            Some(Err(ConvertError::TruncatedRecordError { offset: 0, .. }))
        ));
    }

    #[test]
    fn test_oversized_record_is_rejected() {
        let bytes = encoded(&[problem("A")]);
        let mut reader = DelimitedReader::new("mem", Cursor::new(bytes)).with_max_record_len(4);
        assert!(matches!(
            reader.next(),
            Some(Err(ConvertError::RecordTooLargeError { limit: 4, .. }))
        ));
    }

    #[test]
    fn test_garbage_body_is_a_decode_error() {
        // length 2, then an invalid wire type
        let mut reader = DelimitedReader::new("mem", Cursor::new(vec![0x02u8, 0x0f, 0xff]));
        assert!(matches!(
            reader.next(),
            Some(Err(ConvertError::DecodeError { .. }))
        ));
    }

    /// Serves `data`, then fails every read.
    struct FailingRead {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingRead {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device error")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_failure_is_an_input_error_with_offset() {
        let bytes = encoded(&[problem("A")]);
        let first_len = bytes.len() as u64;
        let inner = FailingRead {
            data: Cursor::new(bytes),
        };

        let mut reader = DelimitedReader::new("train.pb", inner);
        assert_eq!(reader.next().unwrap().unwrap().name, "A");
        let err = reader.next().unwrap().unwrap_err();
        match &err {
            ConvertError::ReadInputError { path, offset, .. } => {
                assert_eq!(path, Path::new("train.pb"));
                assert_eq!(*offset, first_len);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_problem_local());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_missing_file_fails_to_open() {
        let err = DelimitedSource::new()
            .open(Path::new("/definitely/not/here.pb"))
            .err()
            .unwrap();
        assert!(matches!(err, ConvertError::OpenInputError { .. }));
    }
}
