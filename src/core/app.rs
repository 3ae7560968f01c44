// src/core/app.rs

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

use super::cli::{self, Cli};
use super::config::Config;
use super::config_loader::config_path;
use super::logging;
use super::report::{Outcome, report};
use super::sensors::{CounterSource, gather, open_source};

pub struct App {
    config: Config,
}

impl App {
    // Loads the user config and installs the stderr logger
    pub fn load() -> Self {
        let path = config_path();
        let loaded = Config::load_from(&path);
        Self::from_loaded(&path, loaded)
    }

    // The log level lives in the config, so the load outcome is only logged
    // once the subscriber is installed.
    pub fn from_loaded(path: &Path, loaded: Result<Config>) -> Self {
        let level = loaded
            .as_ref()
            .map(|cfg| cfg.log_level.clone())
            .unwrap_or_else(|_| Config::default().log_level);
        logging::init(&level);

        let config = match loaded {
            Ok(config) => {
                info!(path = ?path, ?config, "Configuration loaded");
                config
            }
            Err(err) => {
                warn!(path = ?path, error = %format!("{err:#}"), "Ignoring user config");
                Config::default()
            }
        };
        App { config }
    }

    pub fn with_config(config: Config) -> Self {
        App { config }
    }

    /// Parse `args`, probe the configured source, print to stdout.
    pub fn run<I, T>(&self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        run(
            args,
            || open_source(&self.config),
            &mut stdout.lock(),
            &mut stderr.lock(),
        )
    }
}

/// The whole pipeline with injectable source and streams.
///
/// `open` is only called once the arguments have been accepted and help was
/// not requested.
pub fn run<I, T, F, O, E>(args: I, open: F, out: &mut O, err: &mut E) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: FnOnce() -> Box<dyn CounterSource>,
    O: Write,
    E: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let cli = match Cli::parse_args(args.iter().cloned()) {
        Ok(cli) => cli,
        Err(message) => {
            writeln!(err, "Error: {message}.").context("Writing to stderr")?;
            return Ok(Outcome::Failure);
        }
    };

    if cli.help {
        let program = cli::program_name(args.first());
        err.write_all(cli::usage(&program).as_bytes())
            .context("Writing usage to stderr")?;
        return Ok(Outcome::Failure);
    }

    let source = open();
    let readings = gather(source.as_ref());
    debug!(count = readings.len(), show_all = cli.all, "Gathered readings");
    report(&readings, cli.all, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logged_while(f: impl FnOnce() -> App) -> (App, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let app = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (app, text)
    }

    #[test]
    fn loaded_config_is_logged_after_init() {
        let cfg = Config {
            log_level: "info".into(),
            ..Default::default()
        };
        let (app, logs) = logged_while(|| {
            App::from_loaded(Path::new("/etc/temperature.toml"), Ok(cfg.clone()))
        });
        assert_eq!(app.config, cfg);
        assert!(logs.contains("Configuration loaded"), "{logs}");
    }

    #[test]
    fn broken_config_falls_back_with_warning() {
        let (app, logs) = logged_while(|| {
            App::from_loaded(
                Path::new("/etc/temperature.toml"),
                Err(anyhow::anyhow!("bad toml")),
            )
        });
        assert_eq!(app.config, Config::default());
        assert!(logs.contains("Ignoring user config"), "{logs}");
        assert!(logs.contains("bad toml"), "{logs}");
    }
}
