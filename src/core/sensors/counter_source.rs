// src/core/sensors/counter_source.rs

use serde::Deserialize;
use tracing::debug;

use super::sysctl_source::SysctlSource;
use super::sysfs_source::SysfsSource;
use crate::core::config::Config;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CounterSourceKind {
    #[default]
    Auto,
    Sysctl,
    Sysfs,
}

impl CounterSourceKind {
    /// Pick a concrete source for the platform we were built for.
    pub fn resolve(self) -> Self {
        match self {
            CounterSourceKind::Auto if SysctlSource::SUPPORTED => CounterSourceKind::Sysctl,
            CounterSourceKind::Auto => CounterSourceKind::Sysfs,
            other => other,
        }
    }
}

// A named-counter lookup: an integer value, or `None` when the name does not exist.
pub trait CounterSource {
    fn query(&self, name: &str) -> Option<i32>;
}

pub fn open_source(cfg: &Config) -> Box<dyn CounterSource> {
    let kind = cfg.source.resolve();
    debug!(configured = ?cfg.source, resolved = ?kind, "Opening counter source");
    match kind {
        CounterSourceKind::Sysfs => Box::new(SysfsSource::new(&cfg.sysfs)),
        CounterSourceKind::Sysctl | CounterSourceKind::Auto => Box::new(SysctlSource::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_kinds_resolve_to_themselves() {
        assert_eq!(CounterSourceKind::Sysctl.resolve(), CounterSourceKind::Sysctl);
        assert_eq!(CounterSourceKind::Sysfs.resolve(), CounterSourceKind::Sysfs);
    }

    #[test]
    fn auto_never_stays_auto() {
        assert_ne!(CounterSourceKind::Auto.resolve(), CounterSourceKind::Auto);
    }

    #[test]
    fn sysfs_kind_opens_sysfs_tree() {
        let td = tempfile::TempDir::new().unwrap();
        let zone = td.path().join("thermal_zone0");
        std::fs::create_dir_all(&zone).unwrap();
        std::fs::write(zone.join("temp"), "42000").unwrap();

        let mut cfg = Config::default();
        cfg.source = CounterSourceKind::Sysfs;
        cfg.sysfs.thermal_base = td.path().to_path_buf();
        let source = open_source(&cfg);
        assert_eq!(source.query("hw.acpi.thermal.tz0.temperature"), Some(3151));
    }

    #[test]
    fn kind_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            source: CounterSourceKind,
        }
        let w: Wrapper = toml::from_str(r#"source = "sysfs""#).unwrap();
        assert_eq!(w.source, CounterSourceKind::Sysfs);
    }
}
