pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use crate::core::etl::EtlEngine;
pub use crate::core::pipeline::UniqueIntPipeline;
pub use crate::core::sequence::{FailurePolicy, JobSequence};
pub use domain::model::IntegerSet;
pub use utils::error::{EtlError, Result};
