//! Memory access traces.
//!
//! The engine does not care how accesses are produced; it consumes an ordered
//! stream of [`AccessEvent`]s. This module defines that event and the two
//! on-disk encodings of a stream:
//!
//! ```text
//! # op  address  size  [value]
//! W     0x0040   4     0xdeadbeef
//! R     0x0040   2
//! ```
//!
//! and a JSON array of serialized events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::TraceError;
use crate::common::{AccessSize, AccessType};

/// Operation of an access event. Writes carry their value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessOp {
    /// Load.
    Read,
    /// Store of the given value (low `size` bytes are used).
    Write(u32),
}

/// One load or store issued by the trace producer.
///
/// Deserialized writes are truncated to `size` bytes like those built by
/// [`AccessEvent::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EventRecord")]
pub struct AccessEvent {
    /// First byte accessed.
    pub address: u32,
    /// Number of consecutive bytes accessed.
    pub size: AccessSize,
    /// Read, or write with value.
    pub op: AccessOp,
}

/// Serialized shape of an [`AccessEvent`], before the write value is masked.
#[derive(Deserialize)]
struct EventRecord {
    address: u32,
    size: AccessSize,
    op: AccessOp,
}

impl From<EventRecord> for AccessEvent {
    fn from(record: EventRecord) -> Self {
        match record.op {
            AccessOp::Read => Self::read(record.address, record.size),
            AccessOp::Write(value) => Self::write(record.address, record.size, value),
        }
    }
}

impl AccessEvent {
    /// A load of `size` bytes at `address`.
    pub const fn read(address: u32, size: AccessSize) -> Self {
        Self {
            address,
            size,
            op: AccessOp::Read,
        }
    }

    /// A store of the low `size` bytes of `value` at `address`.
    pub const fn write(address: u32, size: AccessSize, value: u32) -> Self {
        Self {
            address,
            size,
            op: AccessOp::Write(value & size.mask()),
        }
    }

    /// Direction of the access.
    pub const fn access_type(&self) -> AccessType {
        match self.op {
            AccessOp::Read => AccessType::Read,
            AccessOp::Write(_) => AccessType::Write,
        }
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            AccessOp::Read => write!(f, "R {:#x} {}", self.address, self.size.bytes()),
            AccessOp::Write(value) => write!(
                f,
                "W {:#x} {} {:#x}",
                self.address,
                self.size.bytes(),
                value
            ),
        }
    }
}

impl FromStr for AccessEvent {
    type Err = TraceError;

    /// Parses a single trace line; errors report it as line 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s, 1)?.ok_or(TraceError::MissingField {
            line: 1,
            field: "operation",
        })
    }
}

/// Parses a text trace. Blank lines and `#` comments are skipped.
pub fn parse_trace(text: &str) -> Result<Vec<AccessEvent>, TraceError> {
    let mut events = Vec::new();
    for (number, raw) in text.lines().enumerate() {
        if let Some(event) = parse_line(raw, number + 1)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parses a JSON trace (an array of events).
pub fn parse_json_trace(json: &str) -> Result<Vec<AccessEvent>, TraceError> {
    Ok(serde_json::from_str(json)?)
}

fn parse_line(raw: &str, line: usize) -> Result<Option<AccessEvent>, TraceError> {
    let content = raw.split('#').next().unwrap_or_default();
    let mut fields = content.split_whitespace();
    let Some(op) = fields.next() else {
        return Ok(None);
    };

    let access = match op.to_ascii_lowercase().as_str() {
        "r" | "read" | "l" | "load" => AccessType::Read,
        "w" | "write" | "s" | "store" => AccessType::Write,
        _ => {
            return Err(TraceError::UnknownOperation {
                line,
                token: op.to_string(),
            });
        }
    };

    let address = parse_number(fields.next(), line, "address")?;
    let bytes = parse_number(fields.next(), line, "size")?;
    let size = AccessSize::try_from(bytes)
        .map_err(|source| TraceError::InvalidSize { line, source })?;

    let event = match access {
        AccessType::Read => {
            if fields.next().is_some() {
                return Err(TraceError::UnexpectedValue { line });
            }
            AccessEvent::read(address, size)
        }
        AccessType::Write => {
            let value = parse_number(fields.next(), line, "value")?;
            AccessEvent::write(address, size, value)
        }
    };

    if let Some(extra) = fields.next() {
        return Err(TraceError::TrailingField {
            line,
            token: extra.to_string(),
        });
    }
    Ok(Some(event))
}

fn parse_number(token: Option<&str>, line: usize, field: &'static str) -> Result<u32, TraceError> {
    let token = token.ok_or(TraceError::MissingField { line, field })?;
    let parsed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => token.parse::<u32>(),
    };
    parsed.map_err(|_| TraceError::InvalidNumber {
        line,
        field,
        token: token.to_string(),
    })
}
