// src/core/sensors/mod.rs

pub mod counter_source;
pub mod probe;
pub mod sysctl_source;
pub mod sysfs_source;

pub use counter_source::{CounterSource, CounterSourceKind, open_source};
pub use probe::{ACPI_ZONE_LIMIT, Reading, SensorFamily, convert, gather, probe};
