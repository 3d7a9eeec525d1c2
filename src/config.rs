use crate::limits::*;
use crate::model::Ms;

/// Runtime tunables for the reservation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Reservations the store may hold before `add_reservation` is rejected.
    pub max_reservations: usize,
    /// Widest window accepted by `using_room_count`.
    pub max_query_window_ms: Ms,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_reservations: MAX_RESERVATIONS,
            max_query_window_ms: MAX_QUERY_WINDOW_MS,
        }
    }
}

impl ServiceConfig {
    /// Read `INNKEEP_*` variables, falling back to defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_reservations = lookup("INNKEEP_MAX_RESERVATIONS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_reservations);
        let max_query_window_ms = lookup("INNKEEP_MAX_QUERY_WINDOW_MS")
            .and_then(|s| s.parse().ok())
            .filter(|ms: &Ms| *ms > 0)
            .unwrap_or(defaults.max_query_window_ms);
        Self {
            max_reservations,
            max_query_window_ms,
        }
    }
}
