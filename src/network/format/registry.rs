//! Process-wide formatter registry.
//!
//! Formats are looked up by name when a counter is built, so a typo in a
//! configured format fails construction instead of the first emission.
//! The built-in formats are registered on first access:
//!
//! | name    | formatter                         |
//! |---------|-----------------------------------|
//! | `plain` | [`PlainFormatter`]                |
//! | `CSV`   | alias of `plain`                  |
//! | `nil`   | [`NilFormatter`] (discards output) |
//!
//! # Example: adding a format
//!
//! ```rust,ignore
//! struct JsonLines;
//! impl Formatter for JsonLines { /* ... */ }
//!
//! registry::register("jsonl", Arc::new(JsonLines));
//! let counter = Counter::manual("worker 0", Direction::Rx, "jsonl", None)?;
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use log::{debug, info};

use crate::error::{MeterError, Result};
use crate::network::format::nil::NilFormatter;
use crate::network::format::plain::PlainFormatter;
use crate::network::format::traits::Formatter;

/// Format used when none is configured.
pub const DEFAULT_FORMAT: &str = "plain";

/// Names of the formats available without any registration.
pub const BUILTIN_FORMATS: &[&str] = &["plain", "CSV", "nil"];

lazy_static! {
    static ref FORMATS: RwLock<HashMap<String, Arc<dyn Formatter>>> = {
        let plain: Arc<dyn Formatter> = Arc::new(PlainFormatter);
        let mut formats = HashMap::new();
        formats.insert("plain".to_string(), plain.clone());
        formats.insert("CSV".to_string(), plain);
        formats.insert("nil".to_string(), Arc::new(NilFormatter) as Arc<dyn Formatter>);
        RwLock::new(formats)
    };
}

/// Registers `formatter` under `name`, returning the formatter it replaced.
pub fn register(name: &str, formatter: Arc<dyn Formatter>) -> Option<Arc<dyn Formatter>> {
    info!("Registering stats format '{}'", name);
    FORMATS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.to_string(), formatter)
}

/// Find a format by name.
pub fn find_format(name: &str) -> Option<Arc<dyn Formatter>> {
    FORMATS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
}

/// Looks up `name`, failing with [`MeterError::UnknownFormat`] if nobody registered it.
pub fn resolve(name: &str) -> Result<Arc<dyn Formatter>> {
    let formatter = find_format(name).ok_or_else(|| MeterError::UnknownFormat(name.to_string()))?;
    debug!("Resolved stats format '{}' to {}", name, formatter.name());
    Ok(formatter)
}

/// Get all registered format names, sorted.
pub fn format_names() -> Vec<String> {
    let mut names: Vec<String> = FORMATS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl Formatter for Silent {
        fn name(&self) -> &str {
            "silent"
        }
    }

    #[test]
    fn test_builtins_resolve() {
        for name in BUILTIN_FORMATS {
            assert!(resolve(name).is_ok(), "{} should be registered", name);
        }
        assert_eq!(resolve(DEFAULT_FORMAT).unwrap().name(), "plain");
    }

    #[test]
    fn test_csv_aliases_plain() {
        assert_eq!(resolve("CSV").unwrap().name(), "plain");
    }

    #[test]
    fn test_unknown_format_is_config_error() {
        let err = resolve("no-such-format").err().unwrap();
        assert!(matches!(err, MeterError::UnknownFormat(ref name) if name == "no-such-format"));
        assert!(err.is_config_error());
        assert!(find_format("no-such-format").is_none());
    }

    #[test]
    fn test_register_custom_format() {
        assert!(register("registry-test-silent", Arc::new(Silent)).is_none());
        assert_eq!(resolve("registry-test-silent").unwrap().name(), "silent");
        assert!(format_names().contains(&"registry-test-silent".to_string()));

        let replaced = register("registry-test-silent", Arc::new(NilFormatter));
        assert_eq!(replaced.unwrap().name(), "silent");
    }
}
