// src/main.rs
extern crate temperature_rs;

use std::process::ExitCode;
use temperature_rs::core::app::App;

fn main() -> ExitCode {
    // Load config and install the logger
    let app = App::load();
    // Probe once and print
    match app.run(std::env::args_os()) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("Error: {err:#}.");
            ExitCode::FAILURE
        }
    }
}
