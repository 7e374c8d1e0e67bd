pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod model;
pub mod output;
pub mod parser;
pub mod style;

pub use api::{AnalysisOptions, ModgraphError, analyze, write_reports, write_reports_with};
pub use cli::Cli;
pub use commands::{cmd_analyze, cmd_init};
pub use config::Config;
pub use model::AnalysisResult;
