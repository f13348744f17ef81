//! Shaping decoded packets for downstream consumers.
//!
//! The plotting layer wants named columns rather than packets, plus a flag
//! for samples taken while the spacecraft was in Earth's shadow (the bus
//! voltage sags when the panels stop charging).
use crate::error::TelemetryError;
use crate::packet::{FieldValue, SacdPacket};

/// Bus voltage below this is treated as an eclipse period.
pub const ECLIPSE_THRESHOLD: f64 = 32.0;

/// Extract one column per requested field name, in the requested order.
///
/// Every column has one entry per packet, in packet order. An unknown name
/// fails with [`TelemetryError::UnknownField`]; no partial columns are
/// returned.
pub fn columns(
    packets: &[SacdPacket],
    names: &[&str],
) -> Result<Vec<Vec<FieldValue>>, TelemetryError> {
    let mut cols: Vec<Vec<FieldValue>> = (0..names.len())
        .map(|_| Vec::with_capacity(packets.len()))
        .collect();
    for packet in packets {
        for (col, value) in cols.iter_mut().zip(packet.values(names)?) {
            col.push(value);
        }
    }
    Ok(cols)
}

/// Flag each packet whose voltage is below `threshold`, in packet order.
pub fn eclipse_flags(packets: &[SacdPacket], threshold: f64) -> Vec<bool> {
    packets.iter().map(|p| p.voltage < threshold).collect()
}
