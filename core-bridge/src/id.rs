//! Request identifiers
//!
//! An identifier is the current time in milliseconds followed by the decimal
//! text of a random fraction, e.g. `"17000000000000.48213..."`. The only
//! property that matters is that two requests in flight at the same time
//! never share one; the registry refuses a pending duplicate and callers draw
//! again.

use bridge_traits::Clock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Correlation token pairing a request with its single reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Mints fresh [`RequestId`]s from a clock and the thread RNG.
#[derive(Clone)]
pub struct RequestIdGenerator {
    clock: Arc<dyn Clock>,
    entropy: fn() -> f64,
}

fn thread_fraction() -> f64 {
    rand::thread_rng().gen()
}

impl RequestIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_entropy(clock, thread_fraction)
    }

    /// Use `entropy` in place of the thread RNG. It must return values in
    /// `[0, 1)`.
    pub fn with_entropy(clock: Arc<dyn Clock>, entropy: fn() -> f64) -> Self {
        Self { clock, entropy }
    }

    pub fn next_id(&self) -> RequestId {
        let fraction = (self.entropy)();
        RequestId(format!("{}{}", self.clock.unix_timestamp_millis(), fraction))
    }
}

impl fmt::Debug for RequestIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestIdGenerator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::FixedClock;
    use std::collections::HashSet;

    #[test]
    fn test_id_starts_with_clock_millis() {
        let ids = RequestIdGenerator::new(Arc::new(FixedClock::from_millis(1_700_000_000_000)));
        let id = ids.next_id();
        assert!(id.as_str().starts_with("17000000000000."), "got {id}");
    }

    #[test]
    fn test_ids_are_unique_under_a_frozen_clock() {
        let ids = RequestIdGenerator::new(Arc::new(FixedClock::from_millis(42)));
        let minted: HashSet<RequestId> = (0..1_000).map(|_| ids.next_id()).collect();
        assert_eq!(minted.len(), 1_000);
    }

    #[test]
    fn test_custom_entropy_source() {
        let ids = RequestIdGenerator::with_entropy(Arc::new(FixedClock::from_millis(5)), || 0.25);
        assert_eq!(ids.next_id(), RequestId::from("50.25"));
        assert_eq!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = RequestId::from("123.5");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"123.5\"");
    }
}
