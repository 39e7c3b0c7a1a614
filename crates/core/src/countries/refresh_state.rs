use chrono::{DateTime, Utc};
use std::sync::RwLock;

/// Time of the last successful refresh, shared by every request handler.
///
/// Written only after a refresh has committed its rows, so a reader sees
/// either the previous completed refresh or the new one, never one in
/// flight. Overlapping refreshes may finish out of order; the recorded
/// value only moves forward.
#[derive(Debug, Default)]
pub struct RefreshState {
    last_refreshed_at: RwLock<Option<DateTime<Utc>>>,
}

impl RefreshState {
    pub fn new(initial: Option<DateTime<Utc>>) -> Self {
        Self {
            last_refreshed_at: RwLock::new(initial),
        }
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        match self.last_refreshed_at.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Record a completed refresh. Older timestamps are ignored.
    pub fn record(&self, at: DateTime<Utc>) {
        let mut guard = match self.last_refreshed_at.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.map_or(true, |current| at > current) {
            *guard = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_starts_empty() {
        assert_eq!(RefreshState::default().last_refreshed_at(), None);
    }

    #[test]
    fn test_record_moves_forward_only() {
        let state = RefreshState::default();
        let now = Utc::now();

        state.record(now);
        assert_eq!(state.last_refreshed_at(), Some(now));

        state.record(now - Duration::seconds(30));
        assert_eq!(state.last_refreshed_at(), Some(now));

        let later = now + Duration::seconds(30);
        state.record(later);
        assert_eq!(state.last_refreshed_at(), Some(later));
    }
}
