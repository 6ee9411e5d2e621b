//! Data edge of the tax engine: state documents, return files, CSV batches
//! and logging setup for the `tax-calc` binary.

pub mod csv_batch;
pub mod logging;
pub mod return_file;
pub mod state_config;

pub use csv_batch::{BatchLoadError, load_batch_file, load_batch_from_str, summary_line};
pub use return_file::{
    ReturnFileError, ReturnReport, compute_return, parse_return, read_return_file,
};
pub use state_config::{
    BUILTIN_CONFIGS, StateConfigLoadError, build_registry, builtin_configs, load_config_dir,
    parse_state_config,
};
