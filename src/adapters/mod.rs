// Adapters layer: concrete record sources behind `domain::ports::RecordSource`.

pub mod delimited;

pub use delimited::{write_records, DelimitedReader, DelimitedSource};
