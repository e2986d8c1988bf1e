//! Countdown events and component identifiers

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use serde::{Deserialize, Serialize};

static LAST_VIEW_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of a single countdown component instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(u64);

impl ViewId {
    /// Allocate the next process-unique id, starting from 1
    pub fn next() -> Self {
        Self(LAST_VIEW_ID.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "countdown#{}", self.0)
    }
}

/// Event emitted by a running countdown engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CountdownEvent {
    /// Periodic notification with the time left until the target
    Tick {
        #[serde(rename = "remaining_ms", with = "millis")]
        remaining: Duration,
    },
    /// Terminal notification, delivered at most once per engine
    Finish,
}

impl CountdownEvent {
    pub fn is_finish(&self) -> bool {
        matches!(self, CountdownEvent::Finish)
    }

    /// Remaining time carried by a tick
    pub fn remaining(&self) -> Option<Duration> {
        match self {
            CountdownEvent::Tick { remaining } => Some(*remaining),
            CountdownEvent::Finish => None,
        }
    }
}

mod millis {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_ids_are_unique_and_increasing() {
        let a = ViewId::next();
        let b = ViewId::next();
        assert!(b.get() > a.get());
        assert_ne!(a, b);
    }

    #[test]
    fn tick_serializes_with_millis() {
        let tick = CountdownEvent::Tick { remaining: Duration::from_millis(2500) };
        let json = serde_json::to_string(&tick).unwrap();
        assert_eq!(json, r#"{"type":"tick","remaining_ms":2500}"#);

        let finish = serde_json::to_string(&CountdownEvent::Finish).unwrap();
        assert_eq!(finish, r#"{"type":"finish"}"#);
    }

    #[test]
    fn remaining_only_on_ticks() {
        let tick = CountdownEvent::Tick { remaining: Duration::from_secs(3) };
        assert_eq!(tick.remaining(), Some(Duration::from_secs(3)));
        assert!(!tick.is_finish());
        assert_eq!(CountdownEvent::Finish.remaining(), None);
        assert!(CountdownEvent::Finish.is_finish());
    }
}
