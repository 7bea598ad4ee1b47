//! Snowflake ID - 64-bit time-ordered identifier for families and role assignments
//!
//! Layout:
//! - Bits 63-22: milliseconds since [`Snowflake::EPOCH`]
//! - Bits 21-12: worker id (0-1023)
//! - Bits 11-0:  per-millisecond sequence (0-4095)
//!
//! Because the timestamp occupies the high bits, ordering by id is ordering by
//! creation time, which is what the role board relies on for "insertion order".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const MAX_WORKER_ID: u16 = 1 << WORKER_BITS;

/// Time-ordered 64-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Kinship epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which this id was minted
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> (WORKER_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_WORKER_ID - 1)) as u16
    }

    /// Parse from the decimal string form used on the wire
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialized as a string so browsers do not lose precision
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Snowflake(n)),
            Raw::Text(s) => Snowflake::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Lock-free Snowflake generator
///
/// The last issued `(millis << 12) | sequence` pair lives in a single atomic,
/// so concurrent callers never hand out the same id.
pub struct SnowflakeGenerator {
    worker_id: u16,
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id` does not fit in 10 bits
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < MAX_WORKER_ID, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    pub fn generate(&self) -> Snowflake {
        let mut previous = self.state.load(Ordering::Acquire);
        loop {
            let now = current_millis() - Snowflake::EPOCH;
            let last_millis = previous >> SEQUENCE_BITS;

            // Clock going backwards or sequence overflow both borrow from the next millisecond
            let next = if now > last_millis {
                now << SEQUENCE_BITS
            } else {
                previous + 1
            };

            match self
                .state
                .compare_exchange_weak(previous, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    let millis = next >> SEQUENCE_BITS;
                    let sequence = next & SEQUENCE_MASK;
                    return Snowflake::new(
                        (millis << (WORKER_BITS + SEQUENCE_BITS))
                            | (i64::from(self.worker_id) << SEQUENCE_BITS)
                            | sequence,
                    );
                }
                Err(actual) => previous = actual,
            }
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(Snowflake::EPOCH)
}
