//! Identity and clock collaborators consumed by the reducer.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait IdGenerator {
    fn next_uuid(&self) -> Uuid;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Random (v4) identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
