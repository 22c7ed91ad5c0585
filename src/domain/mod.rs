//! Domain - cell model, field presets, configuration

pub mod cell;
pub mod config;
pub mod fields;
