//! The seed a run plays with, taken from `--seed` or drawn from the clock.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use xxhash_rust::xxh3::xxh3_64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedOrigin {
    Flag,
    Clock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSeed {
    pub value: u64,
    pub origin: SeedOrigin,
}

static CLOCK_DRAWS: AtomicU64 = AtomicU64::new(0);

impl RunSeed {
    pub fn from_flag(flag: Option<u64>) -> Self {
        match flag {
            Some(value) => Self { value, origin: SeedOrigin::Flag },
            None => Self::from_clock(),
        }
    }

    /// Distinct per call even within one clock tick.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0_u128, |elapsed| elapsed.as_nanos());
        let draw = CLOCK_DRAWS.fetch_add(1, Ordering::Relaxed);

        let mut entropy = [0_u8; 28];
        entropy[..16].copy_from_slice(&nanos.to_le_bytes());
        entropy[16..20].copy_from_slice(&process::id().to_le_bytes());
        entropy[20..].copy_from_slice(&draw.to_le_bytes());
        Self { value: xxh3_64(&entropy), origin: SeedOrigin::Clock }
    }

    /// Shown to the player so a clock-seeded run can be replayed.
    pub fn replay_hint(self) -> String {
        let value = self.value;
        match self.origin {
            SeedOrigin::Flag => format!("seed {value}"),
            SeedOrigin::Clock => format!("seed {value}; pass --seed {value} to replay"),
        }
    }
}
