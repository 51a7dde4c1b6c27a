//! StickyBoard command-line entry point.

use std::process::ExitCode;
use stickyboard_cli::{Options, run};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting StickyBoard");

    let options = match Options::from_env(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match pollster::block_on(run(&options)) {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
