// src/core/sensors/sysfs_source.rs

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use super::CounterSource;
use super::probe::{CPU_COUNT_COUNTER, TZ_ZEROC};
use crate::core::config::SysfsConfig;

// hwmon chips whose `Core N` labels map onto per-CPU counters
const CPU_CHIPS: &[&str] = &["coretemp"];

/// Answers sysctl-style names from Linux `/sys`.
///
/// Temperatures in `/sys` are milli-degrees Celsius; they are re-encoded into
/// deci-Kelvin so callers see the same values a BSD kernel would report.
pub struct SysfsSource {
    thermal_base: PathBuf,
    hwmon_base: PathBuf,
    cpu_base: PathBuf,
    // discovered on first per-CPU query
    cores: OnceLock<Vec<(usize, PathBuf)>>,
}

impl SysfsSource {
    pub fn new(cfg: &SysfsConfig) -> Self {
        SysfsSource {
            thermal_base: cfg.thermal_base.clone(),
            hwmon_base: cfg.hwmon_base.clone(),
            cpu_base: cfg.cpu_base.clone(),
            cores: OnceLock::new(),
        }
    }

    fn zone_temperature(&self, zone: usize) -> Result<i32> {
        let path = self
            .thermal_base
            .join(format!("thermal_zone{zone}"))
            .join("temp");
        read_millidegrees(&path).and_then(encode_millidegrees)
    }

    fn core_temperature(&self, core: usize) -> Result<i32> {
        let cores = self.cores.get_or_init(|| {
            discover_cores(&self.hwmon_base).unwrap_or_else(|err| {
                debug!(error = %err, "No hwmon core sensors");
                Vec::new()
            })
        });
        let (_, path) = cores
            .iter()
            .find(|(index, _)| *index == core)
            .with_context(|| format!("No hwmon sensor labelled Core {core}"))?;
        read_millidegrees(path).and_then(encode_millidegrees)
    }

    fn cpu_count(&self) -> Result<i32> {
        let mut count = 0;
        for entry in fs::read_dir(&self.cpu_base)
            .with_context(|| format!("Reading cpu directory {:?}", self.cpu_base))?
        {
            let fname = entry?.file_name();
            let fname = fname.to_string_lossy();
            if fname
                .strip_prefix("cpu")
                .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl CounterSource for SysfsSource {
    fn query(&self, name: &str) -> Option<i32> {
        let result = if name == CPU_COUNT_COUNTER {
            self.cpu_count()
        } else if let Some(zone) = parse_index(name, "hw.acpi.thermal.tz", ".temperature") {
            self.zone_temperature(zone)
        } else if let Some(core) = parse_index(name, "dev.cpu.", ".temperature") {
            self.core_temperature(core)
        } else {
            debug!(%name, "Counter has no sysfs equivalent");
            return None;
        };

        match result {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(%name, error = %err, "Counter unavailable");
                None
            }
        }
    }
}

fn parse_index(name: &str, prefix: &str, suffix: &str) -> Option<usize> {
    let digits = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn read_millidegrees(path: &Path) -> Result<i64> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Reading temperature from {path:?}"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("Parsing {:?} as integer", raw.trim()))
}

/// Milli-degrees Celsius to deci-Kelvin offset by `TZ_ZEROC`.
fn encode_millidegrees(milli: i64) -> Result<i32> {
    let deci = (milli as f64 / 100.0).round() as i64;
    i32::try_from(deci)
        .ok()
        .and_then(|deci| deci.checked_add(TZ_ZEROC))
        .with_context(|| format!("{milli} millidegrees is out of range"))
}

fn discover_cores(base: &Path) -> Result<Vec<(usize, PathBuf)>> {
    let mut cores = Vec::new();
    for entry in fs::read_dir(base).with_context(|| format!("Reading {base:?}"))? {
        let dir = entry?.path();
        let chip = fs::read_to_string(dir.join("name"))
            .map(|s| s.trim().to_owned())
            .unwrap_or_default();
        if !CPU_CHIPS.contains(&chip.as_str()) {
            continue;
        }

        for child in fs::read_dir(&dir).context("Scanning hwmon entries")? {
            let fname = child?.file_name().to_string_lossy().into_owned();
            if !(fname.starts_with("temp") && fname.ends_with("_input")) {
                continue;
            }
            let input = dir.join(&fname);
            let label_file = input.with_file_name(fname.replace("_input", "_label"));
            let Ok(label) = fs::read_to_string(&label_file) else {
                continue;
            };
            if let Some(index) = label
                .trim()
                .strip_prefix("Core ")
                .and_then(|n| n.parse::<usize>().ok())
            {
                cores.push((index, input));
            }
        }
    }
    cores.sort();
    debug!(count = cores.len(), base = %base.display(), "Discovered hwmon core sensors");
    Ok(cores)
}
