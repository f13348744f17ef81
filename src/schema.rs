//! Binary layout descriptions for fixed-size records.
//!
//! A [`FieldSpec`] pins one scalar field to a byte order, offset, and width
//! inside a record; a [`RecordSchema`] collects named specs together with the
//! record's total size and checks at construction that every span fits.
//! Extraction itself is pure slicing plus integer assembly; buffer-length
//! validation belongs to the decoder that owns the schema.
use crate::error::TelemetryError;

/// Byte order of one encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Location and encoding of one scalar field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub byte_order: ByteOrder,
    /// Byte position of the field's first byte within the record.
    pub offset: usize,
    /// Field width in bytes (1..=8).
    pub width: usize,
}

impl FieldSpec {
    pub const fn new(byte_order: ByteOrder, offset: usize, width: usize) -> Self {
        Self { byte_order, offset, width }
    }

    /// Extract the field from `bytes` as an unsigned integer.
    ///
    /// Deterministic and side-effect-free. The caller must guarantee
    /// `bytes.len() >= offset + width`; the decoder checks the full record
    /// length before any field is read.
    pub fn read_unsigned(&self, bytes: &[u8]) -> u64 {
        let raw = &bytes[self.offset..self.offset + self.width];
        match self.byte_order {
            ByteOrder::LittleEndian => raw
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
            ByteOrder::BigEndian => raw.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        }
    }
}

/// Named field table plus the fixed total size of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    record_size: usize,
    fields: Vec<(&'static str, FieldSpec)>,
}

impl RecordSchema {
    /// Build a schema, asserting that every field span lies inside the
    /// record. Schemas are construction-time constants, so a span outside
    /// `[0, record_size)` is a programming error, not a runtime condition.
    /// Overlapping spans are permitted; packed layouts may alias bytes.
    pub fn new(record_size: usize, fields: &[(&'static str, FieldSpec)]) -> Self {
        assert!(record_size > 0, "record size must be positive");
        for (name, spec) in fields {
            assert!(
                spec.width >= 1 && spec.width <= 8,
                "field {name}: width {} not in 1..=8",
                spec.width
            );
            assert!(
                spec.offset + spec.width <= record_size,
                "field {name}: span {}..{} exceeds record size {record_size}",
                spec.offset,
                spec.offset + spec.width
            );
        }
        Self { record_size, fields: fields.to_vec() }
    }

    pub fn record_size(&self) -> usize {
        self.record_size
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    /// Extract `name` from `bytes` as a raw unsigned integer.
    pub fn read(&self, name: &str, bytes: &[u8]) -> Result<u64, TelemetryError> {
        let spec = self
            .field(name)
            .ok_or_else(|| TelemetryError::UnknownField(name.to_string()))?;
        Ok(spec.read_unsigned(bytes))
    }

    /// Declared field names, in schema order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }
}
