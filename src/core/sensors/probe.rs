// src/core/sensors/probe.rs

use tracing::debug;

use super::CounterSource;

/// Number of ACPI thermal zones tried. Nothing reports the real count.
pub const ACPI_ZONE_LIMIT: usize = 4;

/// Name of the counter holding the number of CPUs.
pub const CPU_COUNT_COUNTER: &str = "hw.ncpu";

/// 0 °C in the kernel's deci-Kelvin encoding (`TZ_ZEROC` in coretemp.c).
pub const TZ_ZEROC: i32 = 2731;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub name: String,
    pub celsius: i32,
}

impl Reading {
    pub fn new(name: impl Into<String>, celsius: i32) -> Self {
        Self {
            name: name.into(),
            celsius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFamily {
    AcpiThermalZone,
    Cpu,
}

impl SensorFamily {
    pub fn counter_name(self, index: usize) -> String {
        match self {
            SensorFamily::AcpiThermalZone => format!("hw.acpi.thermal.tz{index}.temperature"),
            SensorFamily::Cpu => format!("dev.cpu.{index}.temperature"),
        }
    }
}

/// Deci-Kelvin (offset by `TZ_ZEROC`) to whole degrees Celsius, rounding half up.
pub const fn convert(raw: i32) -> i32 {
    // widened so raw values near i32::MIN cannot overflow; the quotient always fits
    ((raw as i64 - TZ_ZEROC as i64 + 5) / 10) as i32
}

/// Query `family`'s counters in index order, stopping at the first missing one.
pub fn probe(source: &dyn CounterSource, family: SensorFamily, max_count: usize) -> Vec<Reading> {
    let mut readings = Vec::new();
    for index in 0..max_count {
        let name = family.counter_name(index);
        match source.query(&name) {
            Some(raw) => {
                let celsius = convert(raw);
                debug!(%name, raw, celsius, "Read temperature counter");
                readings.push(Reading { name, celsius });
            }
            None => {
                debug!(?family, %name, found = readings.len(), "Counter missing, probe stopped");
                break;
            }
        }
    }
    readings
}

/// ACPI thermal zones first, then one reading per CPU.
pub fn gather(source: &dyn CounterSource) -> Vec<Reading> {
    let mut readings = probe(source, SensorFamily::AcpiThermalZone, ACPI_ZONE_LIMIT);

    match source.query(CPU_COUNT_COUNTER) {
        Some(count) if count > 0 => {
            readings.extend(probe(source, SensorFamily::Cpu, count as usize));
        }
        other => debug!(cpu_count = ?other, "No usable CPU count, skipping per-CPU sensors"),
    }

    readings
}
