use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::StrategyChoice;

/// List every file and directory beneath one or more directories
#[derive(Parser, Debug)]
#[command(
    name = "fslist",
    about = "List every file and directory beneath one or more directories",
    version,
    long_about = "fslist prints every file and directory nested beneath each PATH, one per \
                  line, as paths relative to PATH sorted byte-wise. The exit status is \
                  non-zero if any PATH could not be listed.\n\n\
                  Examples:\n  \
                  fslist .github\n  \
                  fslist --strategy stat src tests\n  \
                  fslist --format json ."
)]
pub struct CliArgs {
    #[arg(value_name = "PATH", required = true, help = "Directories to list")]
    pub paths: Vec<PathBuf>,

    #[arg(
        short = 's',
        long,
        value_enum,
        help = "Traversal strategy (overrides FSLIST_STRATEGY; default: auto)"
    )]
    pub strategy: Option<StrategyArg>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "plain",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Auto,
    Recursive,
    Typed,
    Stat,
}

impl From<StrategyArg> for StrategyChoice {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => StrategyChoice::Auto,
            StrategyArg::Recursive => StrategyChoice::Recursive,
            StrategyArg::Typed => StrategyChoice::Typed,
            StrategyArg::Stat => StrategyChoice::Stat,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Plain,
    Json,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Plain => super::output::OutputFormat::Plain,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
        }
    }
}
