//! Settings for the stats sampler.
//!
//! Options can come from the command line (`clap`), a TOML config file
//! (`serde` + `toml`) or the fluent builder.
//!
//! # Example
//!
//! ```rust
//! use pktmeter::settings::SettingsBuilder;
//!
//! let options = SettingsBuilder::new()
//!     .format("plain")
//!     .drain_ms(100, 50)
//!     .build();
//! ```

pub mod builder;
pub mod config;
pub mod stats;

// Re-export commonly used types
pub use builder::SettingsBuilder;
pub use config::{
    config_dir, default_config_path, list_configs, load_config, load_config_if_exists,
    parse_config, save_config,
};
pub use stats::StatsOptions;
