//! SAC-D telemetry capture decoding library.
//!
//! This crate turns fixed-format binary telemetry captures into typed,
//! engineering-unit records:
//!
//! - `schema`: byte-order/offset/width field descriptions and the named,
//!   bounds-checked record layout
//! - `packet`: the per-layout `PacketDecoder` trait and the concrete SAC-D
//!   4000-byte record (epoch timestamp, calibrated bus voltage)
//! - `reader`: single-pass file reader that validates the capture length and
//!   decodes records in file order
//! - `transform`: column extraction and eclipse flagging for the plotting
//!   layer
//! - `error`: the `TelemetryError` kinds shared by all of the above
//!
//! The `dump` binary in `src/bin/dump.rs` uses these modules to print the
//! decoded contents of a capture file.
pub mod error;
pub mod packet;
pub mod reader;
pub mod schema;
pub mod transform;

pub use error::TelemetryError;
pub use packet::{FieldValue, PacketDecoder, SacdDecoder, SacdPacket};
pub use reader::PacketReader;
