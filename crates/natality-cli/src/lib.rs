//! Library side of the `natality` CLI: configuration, logging setup and the
//! pipeline stages behind each subcommand.

pub mod config;
pub mod logging;
pub mod pipeline;
