use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds, the only time type.
pub type Ms = i64;

/// Half-open stay `[check_in, check_out)`.
///
/// A checkout at `T` frees the room for a check-in at `T`, so stays that
/// touch at a boundary never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stay {
    pub check_in: Ms,
    pub check_out: Ms,
}

impl Stay {
    pub fn new(check_in: Ms, check_out: Ms) -> Self {
        Self { check_in, check_out }
    }

    pub fn is_valid(&self) -> bool {
        self.check_in < self.check_out
    }

    pub fn duration_ms(&self) -> Ms {
        self.check_out - self.check_in
    }

    pub fn overlaps(&self, other: &Stay) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// True if the stay intersects the closed window `[start, end]`.
    pub fn intersects_window(&self, start: Ms, end: Ms) -> bool {
        self.check_in <= end && self.check_out > start
    }
}

/// A booking of one room group for one stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Ulid,
    pub user_id: Ulid,
    pub hotel_id: Ulid,
    /// Room group (room type) being booked, not a physical room.
    pub room_id: Ulid,
    pub stay: Stay,
    pub people_count: u32,
    pub total_price: i64,
    pub paid_amount: i64,
    pub created_at: Ms,
    pub updated_at: Ms,
}

impl Reservation {
    /// New unpaid reservation; timestamps are stamped by the service on write.
    pub fn new(
        id: Ulid,
        user_id: Ulid,
        hotel_id: Ulid,
        room_id: Ulid,
        stay: Stay,
        people_count: u32,
        total_price: i64,
    ) -> Self {
        Self {
            id,
            user_id,
            hotel_id,
            room_id,
            stay,
            people_count,
            total_price,
            paid_amount: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount >= self.total_price
    }
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOccupancy {
    pub room_id: Ulid,
    pub window_start: Ms,
    pub window_end: Ms,
    pub rooms_in_use: usize,
}
