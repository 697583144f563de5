//! Core collaborator contracts.
//!
//! The sampler consumes devices, a clock, packet buffers and output sinks
//! through the narrow interfaces defined here.

pub mod clock;
pub mod device;
pub mod packet_data;
pub mod sink;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use device::{Device, SimulatedDevice};
pub use packet_data::{Packet, PacketData};
pub use sink::{CaptureBuffer, OutputSink};
