use colored::Colorize;
use ip_subnet_calc::config::{exit_code, input_error, Config};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

fn init_logging() {
    let file = std::env::var("IPC_LOG_CONFIG").unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string());
    if Path::new(&file).exists() {
        if let Err(e) = log4rs::init_file(&file, Default::default()) {
            eprintln!("Error initializing log4rs from {file}: {e}");
        }
        return;
    }
    // stdout is reserved for results
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Error initializing log4rs: {e}");
            }
        }
        Err(e) => eprintln!("Error building log4rs config: {e}"),
    }
}

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging();
    log::info!("#Start main()");

    let config = match Config::try_parse_from(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => {
            match input_error(&e) {
                Some(input) => eprintln!("{} {input}", "Error:".red()),
                // help, version and usage errors
                None => {
                    if let Err(io) = e.print() {
                        eprintln!("Error printing usage: {io}");
                    }
                }
            }
            return ExitCode::from(exit_code(&e) as u8);
        }
    };
    if !config.color {
        colored::control::set_override(false);
    }

    match ip_subnet_calc::run(&config) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::warn!("run failed: {e:?}");
            eprintln!("{} {e}", "Error:".red());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
