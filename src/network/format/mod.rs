pub mod nil;
pub mod plain;
pub mod registry;
pub mod traits;

// Re-export formatter types for convenience
pub use nil::NilFormatter;
pub use plain::PlainFormatter;
pub use registry::{find_format, format_names, register, resolve, DEFAULT_FORMAT};
pub use traits::{FinalEvent, Formatter, UpdateEvent};
