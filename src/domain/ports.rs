use crate::domain::model::{DirNaming, ErrorPolicy, FieldMapping, ReshapePolicy};
use crate::domain::proto::ContestProblem;
use crate::utils::error::Result;
use std::path::Path;

/// Opens one record container and yields its problems in file order.
pub trait RecordSource {
    type Reader: Iterator<Item = Result<ContestProblem>>;

    fn open(&self, path: &Path) -> Result<Self::Reader>;
}

/// Output file system, addressed relative to an output root.
pub trait Storage {
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn output_root(&self) -> Option<&Path>;
    fn dir_naming(&self) -> DirNaming;
    fn reshape_policy(&self) -> ReshapePolicy;
    fn error_policy(&self) -> ErrorPolicy;
    fn field_mapping(&self) -> Result<FieldMapping>;
}
