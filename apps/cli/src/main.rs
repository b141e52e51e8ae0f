mod args;
mod config;
mod main_lib;
mod output;
mod progress;

use std::process::ExitCode;

use args::Args;
use clap::Parser;
use config::Config;
use main_lib::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };

    let config = Config::from_env();
    init_tracing(&config);

    match run(&args, &config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
