use clap::Parser;
use std::process::ExitCode;

use dirmanifest::cli::{Cli, Output};
use dirmanifest::scanner::RootNotFound;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let output = Output::new(false, false);
            if let Some(missing) = err.downcast_ref::<RootNotFound>() {
                output.error(&format!("Error: {}", missing));
            } else {
                output.error(&format!("Error: {:#}", err));
            }
            ExitCode::from(1)
        }
    }
}
