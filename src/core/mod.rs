pub mod emitter;
pub mod etl;
pub mod problems;
pub mod reporter;
pub mod reshape;

pub use crate::domain::model::{DirNaming, EmitReport, ErrorPolicy, ReshapePolicy, RunSummary};
pub use crate::domain::ports::{ConfigProvider, RecordSource, Storage};
pub use crate::domain::proto::ContestProblem;
pub use crate::utils::error::Result;
