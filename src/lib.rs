pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::delimited::DelimitedSource;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{emitter::Emitter, etl::ConversionEngine, reporter::report_names_and_sources};
pub use utils::error::{ConvertError, Result};
