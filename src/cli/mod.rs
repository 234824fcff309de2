pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, OutputFormatArg, StrategyArg};
pub use handlers::handle_list;
pub use output::{OutputFormat, OutputFormatter};
