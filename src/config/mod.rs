pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use crate::domain::model::{DirNaming, ErrorPolicy, ReshapePolicy};
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "code-contests-apps")]
    #[command(about = "Convert code_contests problem records into apps-format directories")]
    pub struct CliConfig {
        /// Record containers of length-delimited ContestProblem messages
        #[arg(required = true, value_name = "INPUT")]
        pub inputs: Vec<PathBuf>,

        /// TOML configuration file; flags below override it
        #[arg(short, long, value_name = "FILE")]
        pub config: Option<PathBuf>,

        /// Output root directory (one sub-directory per problem)
        #[arg(short, long, value_name = "DIR")]
        pub output: Option<PathBuf>,

        #[arg(long, value_enum)]
        pub naming: Option<DirNaming>,

        #[arg(long, value_enum)]
        pub reshape: Option<ReshapePolicy>,

        /// What to do when writing one problem fails
        #[arg(long = "on-error", value_enum)]
        pub on_error: Option<ErrorPolicy>,

        /// Reject records whose length prefix exceeds this many bytes
        #[arg(long, value_name = "BYTES")]
        pub max_record_bytes: Option<u64>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    impl CliConfig {
        /// Loads the config file (if any), applies command-line overrides and validates.
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => TomlConfig::default(),
            };

            if let Some(output) = &self.output {
                config.output.root = Some(output.to_string_lossy().into_owned());
            }
            if let Some(naming) = self.naming {
                config.output.naming = naming;
            }
            if let Some(reshape) = self.reshape {
                config.transform.reshape = reshape;
            }
            if let Some(on_error) = self.on_error {
                config.error_handling.on_problem_error = on_error;
            }

            config.validate()?;
            Ok(config)
        }
    }

}
