pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod reporting;

/// Version string with build metadata, shown by `--version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);
