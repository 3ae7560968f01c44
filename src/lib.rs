// src/lib.rs
//! Report CPU/ACPI temperatures read from kernel counters.

pub mod core;
