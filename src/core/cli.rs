// src/core/cli.rs

use clap::Parser;
use std::ffi::OsString;
use std::path::Path;

/// Write system temperature (CPU/ACPI) to stdout
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "temperature")]
#[command(disable_help_flag = true, args_override_self = true)]
pub struct Cli {
    /// List all values
    #[arg(short, long)]
    pub all: bool,

    /// Show this help
    #[arg(short, long)]
    pub help: bool,
}

impl Cli {
    /// Parse `args` (program name first), returning the one-line message on failure.
    pub fn parse_args<I, T>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map_err(|err| error_message(&err))
    }
}

// clap renders "error: <message>\n\nUsage: ..."; keep only the message.
fn error_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    first
        .strip_prefix("error: ")
        .unwrap_or(first)
        .trim_end_matches('.')
        .to_owned()
}

pub fn program_name(argv0: Option<&OsString>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "temperature".to_owned())
}

pub fn usage(program: &str) -> String {
    let mut usage = String::with_capacity(250);
    usage.push_str("Write system temperature (CPU/ACPI) to stdout.\n\n");
    usage.push_str("Only the highest temperature is written,");
    usage.push_str(" or 0 if no temperature is available.\n\n");
    usage.push_str(&format!("Usage: {program} [-a|-h]\n\n"));
    usage.push_str("Options:\n");
    usage.push_str("-a --all   List all values.\n");
    usage.push_str("-h --help  Show this help.\n");
    usage
}
