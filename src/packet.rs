//! Typed record decoding for the SAC-D telemetry format.
//!
//! [`PacketDecoder`] is the per-layout capability: a fixed record size plus a
//! pure `decode` from one record's bytes to a typed packet. [`SacdDecoder`]
//! implements it for the 4000-byte SAC-D bus record, deriving a calendar
//! timestamp (under an injected UTC offset) and an engineering-unit voltage.
//! New record layouts are added as new decoder/packet pairs, not subclasses.
use crate::error::TelemetryError;
use crate::schema::{ByteOrder, FieldSpec, RecordSchema};
use once_cell::sync::Lazy;
use time::{OffsetDateTime, UtcOffset};

/// Total size of one SAC-D bus record.
pub const SACD_RECORD_SIZE: usize = 4000;

/// Calibration constants of the originating hardware. The decoded voltage is
/// `raw * SCALE - OFFSET`; both values are exact and must not be re-derived.
pub const VOLTAGE_SCALE: f64 = 0.01873128;
pub const VOLTAGE_OFFSET: f64 = 38.682956;

static SACD_SCHEMA: Lazy<RecordSchema> = Lazy::new(|| {
    RecordSchema::new(
        SACD_RECORD_SIZE,
        &[
            ("timestamp", FieldSpec::new(ByteOrder::LittleEndian, 598, 4)),
            ("voltage", FieldSpec::new(ByteOrder::BigEndian, 2354, 2)),
        ],
    )
});

/// Layout of the SAC-D record, shared read-only across decodes.
pub fn sacd_schema() -> &'static RecordSchema {
    &SACD_SCHEMA
}

/// One decoded field value, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Timestamp(OffsetDateTime),
    Float(f64),
}

/// Decodes fixed-size byte chunks into typed packets.
///
/// `decode` must be pure and stateless: no cross-record state, so chunks may
/// be decoded in parallel or out of order by a caller that fetched them
/// independently.
pub trait PacketDecoder {
    type Packet;

    /// Fixed number of bytes consumed per record.
    fn record_size(&self) -> usize;

    /// Decode exactly one record. Fails with
    /// [`TelemetryError::RecordLength`] unless `bytes` is exactly
    /// [`record_size`](Self::record_size) long; never partially populates.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Packet, TelemetryError>;
}

/// One decoded SAC-D telemetry sample. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SacdPacket {
    /// Sample moment, in the offset the decoder was built with.
    pub timestamp: OffsetDateTime,
    /// Bus voltage in volts.
    pub voltage: f64,
}

impl SacdPacket {
    /// Look up fields by name, returned in the *requested* order.
    ///
    /// Any subset and any permutation of the declared names is valid;
    /// an unknown name fails with [`TelemetryError::UnknownField`] and
    /// nothing is returned.
    pub fn values(&self, names: &[&str]) -> Result<Vec<FieldValue>, TelemetryError> {
        names
            .iter()
            .map(|&name| match name {
                "timestamp" => Ok(FieldValue::Timestamp(self.timestamp)),
                "voltage" => Ok(FieldValue::Float(self.voltage)),
                other => Err(TelemetryError::UnknownField(other.to_string())),
            })
            .collect()
    }
}

/// Decoder for the SAC-D bus record.
///
/// The timestamp zone is injected at construction so decoding is reproducible
/// across environments instead of depending on ambient process state.
#[derive(Debug, Clone, Copy)]
pub struct SacdDecoder {
    tz: UtcOffset,
}

impl SacdDecoder {
    pub fn new(tz: UtcOffset) -> Self {
        Self { tz }
    }

    /// Decoder using the process-local UTC offset, falling back to UTC when
    /// the local offset cannot be determined.
    pub fn local() -> Self {
        Self::new(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
    }

    pub fn utc_offset(&self) -> UtcOffset {
        self.tz
    }
}

impl PacketDecoder for SacdDecoder {
    type Packet = SacdPacket;

    fn record_size(&self) -> usize {
        SACD_RECORD_SIZE
    }

    fn decode(&self, bytes: &[u8]) -> Result<SacdPacket, TelemetryError> {
        if bytes.len() != SACD_RECORD_SIZE {
            return Err(TelemetryError::RecordLength {
                expected: SACD_RECORD_SIZE,
                found: bytes.len(),
            });
        }
        let raw_ts = SACD_SCHEMA.read("timestamp", bytes)? as i64;
        let timestamp = OffsetDateTime::from_unix_timestamp(raw_ts)
            .map_err(|_| TelemetryError::TimestampRange(raw_ts))?
            .to_offset(self.tz);
        let raw_v = SACD_SCHEMA.read("voltage", bytes)?;
        let voltage = raw_v as f64 * VOLTAGE_SCALE - VOLTAGE_OFFSET;
        Ok(SacdPacket { timestamp, voltage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    /// 4000-byte record with a known timestamp and raw voltage planted at
    /// their declared offsets.
    fn sample_record() -> Vec<u8> {
        let mut bytes = vec![0u8; SACD_RECORD_SIZE];
        // 2023-01-01 00:00:00 UTC
        bytes[598..602].copy_from_slice(&1_672_531_200u32.to_le_bytes());
        // (33.0 + 38.682956) / 0.01873128 = 3827, approx 33.0 V
        bytes[2354..2356].copy_from_slice(&3827u16.to_be_bytes());
        bytes
    }

    #[test]
    fn decode_known_values() {
        let decoder = SacdDecoder::new(UtcOffset::UTC);
        let packet = decoder.decode(&sample_record()).unwrap();
        assert_eq!(packet.timestamp, datetime!(2023-01-01 0:00 UTC));
        let expected = 3827.0 * VOLTAGE_SCALE - VOLTAGE_OFFSET;
        assert!((packet.voltage - expected).abs() < 1e-6);
        assert!((packet.voltage - 33.001_652_56).abs() < 1e-6);
    }

    #[test]
    fn decode_is_deterministic() {
        let decoder = SacdDecoder::new(UtcOffset::UTC);
        let bytes = sample_record();
        assert_eq!(decoder.decode(&bytes).unwrap(), decoder.decode(&bytes).unwrap());
    }

    #[test]
    fn decode_applies_injected_offset() {
        let tz = UtcOffset::from_hms(-3, 0, 0).unwrap();
        let packet = SacdDecoder::new(tz).decode(&sample_record()).unwrap();
        assert_eq!(packet.timestamp.offset(), tz);
        // Same instant regardless of rendering offset
        assert_eq!(packet.timestamp.unix_timestamp(), 1_672_531_200);
    }

    #[test]
    fn values_follow_requested_order() {
        let packet = SacdDecoder::new(UtcOffset::UTC)
            .decode(&sample_record())
            .unwrap();
        let both = packet.values(&["voltage", "timestamp"]).unwrap();
        assert_eq!(both[0], FieldValue::Float(packet.voltage));
        assert_eq!(both[1], FieldValue::Timestamp(packet.timestamp));

        let subset = packet.values(&["timestamp"]).unwrap();
        assert_eq!(subset, vec![FieldValue::Timestamp(packet.timestamp)]);
    }

    #[test]
    fn values_rejects_unknown_name() {
        let packet = SacdDecoder::new(UtcOffset::UTC)
            .decode(&sample_record())
            .unwrap();
        let err = packet.values(&["voltage", "altitude"]).unwrap_err();
        assert!(matches!(err, TelemetryError::UnknownField(n) if n == "altitude"));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let err = SacdDecoder::new(UtcOffset::UTC)
            .decode(&[0u8; 100])
            .unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::RecordLength { expected: SACD_RECORD_SIZE, found: 100 }
        ));
    }

    #[test]
    fn schema_matches_record_constants() {
        let schema = sacd_schema();
        assert_eq!(schema.record_size(), SACD_RECORD_SIZE);
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["timestamp", "voltage"]);
    }
}
