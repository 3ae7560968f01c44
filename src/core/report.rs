// src/core/report.rs

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::io::Write;
use std::process::ExitCode;

use super::sensors::Reading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

/// Highest temperature seen, 0 when nothing was read.
pub fn highest(readings: &[Reading]) -> i32 {
    readings.iter().map(|r| r.celsius).max().unwrap_or(0)
}

/// Print every reading (`show_all`) or only the highest one.
pub fn report<W: Write>(readings: &[Reading], show_all: bool, out: &mut W) -> Result<Outcome> {
    let mut buf = String::with_capacity(if show_all { 500 } else { 8 });
    if show_all {
        for Reading { name, celsius } in readings {
            writeln!(buf, "{name}: {celsius}°")?;
        }
    } else {
        writeln!(buf, "{}°", highest(readings))?;
    }

    out.write_all(buf.as_bytes())
        .and_then(|()| out.flush())
        .context("Writing temperatures to stdout")?;

    Ok(if readings.is_empty() {
        Outcome::Failure
    } else {
        Outcome::Success
    })
}
