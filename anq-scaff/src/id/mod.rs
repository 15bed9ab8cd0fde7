//! Snowflake ID generation
//!
//! 64-bit ids laid out as
//!
//! ```text
//! | 41 bits: ms since 2020-01-01 | 5 bits: datacenter | 5 bits: worker | 12 bits: sequence |
//! ```
//!
//! Generated services call [`next_id`] for every new primary key. The
//! process-wide generator defaults to worker 1 / datacenter 1 and can be
//! configured once at startup with [`init`].
//!
//! # Example
//!
//! ```rust
//! use anq_scaff::id::Snowflake;
//!
//! let ids = Snowflake::new(3, 1).unwrap();
//! let a = ids.next_id().unwrap();
//! let b = ids.next_id().unwrap();
//! assert!(b > a);
//! ```

use crate::config::SnowflakeConfig;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use thiserror::Error;

/// Custom epoch, 2020-01-01T00:00:00Z in milliseconds
pub const EPOCH_MS: i64 = 1_577_836_800_000;

const WORKER_ID_BITS: u32 = 5;
const DATACENTER_ID_BITS: u32 = 5;
const SEQUENCE_BITS: u32 = 12;

/// Largest valid worker id
pub const MAX_WORKER_ID: u64 = (1 << WORKER_ID_BITS) - 1;

/// Largest valid datacenter id
pub const MAX_DATACENTER_ID: u64 = (1 << DATACENTER_ID_BITS) - 1;

const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const WORKER_ID_SHIFT: u32 = SEQUENCE_BITS;
const DATACENTER_ID_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS + DATACENTER_ID_BITS;

/// ID generation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// Worker id outside `0..=31`
    #[error("worker id {0} out of range 0..=31")]
    InvalidWorkerId(u64),

    /// Datacenter id outside `0..=31`
    #[error("datacenter id {0} out of range 0..=31")]
    InvalidDatacenterId(u64),

    /// The clock reports a time earlier than the last issued id
    #[error("clock moved backwards by {0} ms, refusing to generate id")]
    ClockMovedBackwards(i64),

    /// The clock reports a time before the custom epoch
    #[error("clock is before the id epoch")]
    BeforeEpoch,

    /// [`init`] was called after the generator was already in use
    #[error("id generator already initialized")]
    AlreadyInitialized,
}

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

struct Sequence {
    last_timestamp: i64,
    value: u64,
}

/// Thread-safe snowflake generator
pub struct Snowflake {
    worker_id: u64,
    datacenter_id: u64,
    state: Mutex<Sequence>,
    clock: Clock,
}

impl Snowflake {
    /// Create a generator for the given worker and datacenter
    pub fn new(worker_id: u64, datacenter_id: u64) -> Result<Self, IdError> {
        Self::with_clock(worker_id, datacenter_id, || {
            chrono::Utc::now().timestamp_millis()
        })
    }

    /// Create a generator reading milliseconds from `clock`
    pub fn with_clock<F>(worker_id: u64, datacenter_id: u64, clock: F) -> Result<Self, IdError>
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        if worker_id > MAX_WORKER_ID {
            return Err(IdError::InvalidWorkerId(worker_id));
        }
        if datacenter_id > MAX_DATACENTER_ID {
            return Err(IdError::InvalidDatacenterId(datacenter_id));
        }

        Ok(Self {
            worker_id,
            datacenter_id,
            state: Mutex::new(Sequence {
                last_timestamp: -1,
                value: 0,
            }),
            clock: Box::new(clock),
        })
    }

    /// Worker id encoded in every id
    #[must_use]
    pub const fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// Datacenter id encoded in every id
    #[must_use]
    pub const fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// Issue the next id
    ///
    /// Up to 4096 ids per millisecond; past that the call spins until the
    /// clock advances.
    pub fn next_id(&self) -> Result<u64, IdError> {
        let mut state = self.state.lock();
        let mut timestamp = (self.clock)();

        if timestamp < state.last_timestamp {
            return Err(IdError::ClockMovedBackwards(
                state.last_timestamp - timestamp,
            ));
        }

        if timestamp == state.last_timestamp {
            state.value = (state.value + 1) & SEQUENCE_MASK;
            if state.value == 0 {
                while timestamp <= state.last_timestamp {
                    std::hint::spin_loop();
                    timestamp = (self.clock)();
                }
            }
        } else {
            state.value = 0;
        }

        state.last_timestamp = timestamp;

        let elapsed = u64::try_from(timestamp - EPOCH_MS).map_err(|_| IdError::BeforeEpoch)?;
        Ok((elapsed << TIMESTAMP_SHIFT)
            | (self.datacenter_id << DATACENTER_ID_SHIFT)
            | (self.worker_id << WORKER_ID_SHIFT)
            | state.value)
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snowflake")
            .field("worker_id", &self.worker_id)
            .field("datacenter_id", &self.datacenter_id)
            .finish_non_exhaustive()
    }
}

/// Split an id into `(ms since epoch, datacenter, worker, sequence)`
#[must_use]
pub const fn decompose(id: u64) -> (u64, u64, u64, u64) {
    (
        id >> TIMESTAMP_SHIFT,
        (id >> DATACENTER_ID_SHIFT) & MAX_DATACENTER_ID,
        (id >> WORKER_ID_SHIFT) & MAX_WORKER_ID,
        id & SEQUENCE_MASK,
    )
}

static GENERATOR: OnceCell<Snowflake> = OnceCell::new();

/// Configure the process-wide generator
///
/// Must run before the first [`next_id`]; later calls fail with
/// [`IdError::AlreadyInitialized`].
pub fn init(worker_id: u64, datacenter_id: u64) -> Result<(), IdError> {
    let generator = Snowflake::new(worker_id, datacenter_id)?;
    GENERATOR
        .set(generator)
        .map_err(|_| IdError::AlreadyInitialized)?;
    tracing::info!(worker_id, datacenter_id, "snowflake id generator initialized");
    Ok(())
}

/// Configure the process-wide generator from [`SnowflakeConfig`]
pub fn init_from_config(config: &SnowflakeConfig) -> Result<(), IdError> {
    init(config.worker_id, config.datacenter_id)
}

/// Next id from the process-wide generator, as a decimal string
pub fn next_id() -> Result<String, IdError> {
    let generator = GENERATOR.get_or_try_init(|| {
        let defaults = SnowflakeConfig::default();
        Snowflake::new(defaults.worker_id, defaults.datacenter_id)
    })?;
    generator.next_id().map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::Arc;

    const NOW: i64 = EPOCH_MS + 1_000;

    #[test]
    fn test_ids_unique_and_increasing() {
        let ids = Snowflake::new(1, 1).unwrap();
        let mut seen = HashSet::new();
        let mut last = 0;

        for _ in 0..10_000 {
            let id = ids.next_id().unwrap();
            assert!(id > last);
            assert!(seen.insert(id));
            last = id;
        }
    }

    #[test]
    fn test_layout() {
        let ids = Snowflake::with_clock(7, 3, || NOW).unwrap();
        let id = ids.next_id().unwrap();

        assert_eq!(decompose(id), (1_000, 3, 7, 0));
        assert_eq!(decompose(ids.next_id().unwrap()), (1_000, 3, 7, 1));
    }

    #[test]
    fn test_invalid_ids() {
        assert_eq!(
            Snowflake::new(32, 1).unwrap_err(),
            IdError::InvalidWorkerId(32)
        );
        assert_eq!(
            Snowflake::new(1, 32).unwrap_err(),
            IdError::InvalidDatacenterId(32)
        );
        assert!(Snowflake::new(MAX_WORKER_ID, MAX_DATACENTER_ID).is_ok());
    }

    #[test]
    fn test_clock_moved_backwards() {
        let now = Arc::new(AtomicI64::new(NOW));
        let clock = Arc::clone(&now);
        let ids = Snowflake::with_clock(1, 1, move || clock.load(Ordering::SeqCst)).unwrap();

        ids.next_id().unwrap();
        now.store(NOW - 5, Ordering::SeqCst);

        assert_eq!(ids.next_id().unwrap_err(), IdError::ClockMovedBackwards(5));
    }

    #[test]
    fn test_sequence_overflow_waits_for_next_ms() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let ids = Snowflake::with_clock(1, 1, move || {
            if counter.fetch_add(1, Ordering::SeqCst) < 4097 {
                NOW
            } else {
                NOW + 1
            }
        })
        .unwrap();

        for expected in 0..4096 {
            let (ms, _, _, sequence) = decompose(ids.next_id().unwrap());
            assert_eq!((ms, sequence), (1_000, expected));
        }

        let (ms, _, _, sequence) = decompose(ids.next_id().unwrap());
        assert_eq!((ms, sequence), (1_001, 0));
    }

    #[test]
    fn test_before_epoch() {
        let ids = Snowflake::with_clock(1, 1, || EPOCH_MS - 1).unwrap();
        assert_eq!(ids.next_id().unwrap_err(), IdError::BeforeEpoch);
    }

    #[test]
    fn test_global_next_id() {
        let a: u64 = next_id().unwrap().parse().unwrap();
        let b: u64 = next_id().unwrap().parse().unwrap();
        assert!(b > a);
    }
}
