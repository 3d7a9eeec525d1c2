use crate::model::Ms;

const DAY_MS: Ms = 86_400_000;

/// 2000-01-01T00:00:00Z
pub const MIN_VALID_TIMESTAMP_MS: Ms = 946_684_800_000;
/// 2100-01-01T00:00:00Z
pub const MAX_VALID_TIMESTAMP_MS: Ms = 4_102_444_800_000;

pub const MAX_STAY_DURATION_MS: Ms = 365 * DAY_MS;
pub const MAX_QUERY_WINDOW_MS: Ms = 2 * 365 * DAY_MS;

pub const MAX_PEOPLE_PER_RESERVATION: u32 = 64;
pub const MAX_RESERVATIONS: usize = 1_000_000;
