//! HTTP API and command line for the assortment gap report.

pub mod app;
pub mod cli;
pub mod settings;

pub use settings::{Settings, SettingsError};
