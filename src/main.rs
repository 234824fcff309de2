use fslist::cli::{handle_list, CliArgs};
use fslist::util::logging::{init_logging, parse_level, LoggingConfig};
use fslist::{FslistConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = FslistConfig::default();
    init_logging_from_args(&args, &config);

    debug!("fslist v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let exit_code = handle_list(&args, config).await;
    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &FslistConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    init_logging(LoggingConfig {
        use_json: config.log_json,
        ..LoggingConfig::with_level(level)
    });
}
