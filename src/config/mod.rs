//! Configuration module for dbscope.
//!
//! Handles connection entries, environment variables, and metadata settings.

mod settings;

pub use settings::{expand_env_vars, ConnectionSettings, MetadataSettings, Settings, SettingsError};
