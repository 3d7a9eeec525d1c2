mod memory;

pub use memory::InMemoryRepository;

use async_trait::async_trait;
use ulid::Ulid;

use crate::model::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Duplicate(Ulid),
    Missing(Ulid),
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Duplicate(id) => write!(f, "duplicate reservation: {id}"),
            StoreError::Missing(id) => write!(f, "missing reservation: {id}"),
            StoreError::Backend(e) => write!(f, "store backend error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence port for reservations.
///
/// List operations return reservations ordered by check-in.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Store a new reservation. Fails with `Duplicate` if the id is taken.
    async fn insert(&self, reservation: Reservation) -> Result<(), StoreError>;

    /// Overwrite an existing reservation, returning the previous record.
    async fn replace(&self, reservation: Reservation) -> Result<Reservation, StoreError>;

    async fn remove(&self, id: Ulid) -> Result<Reservation, StoreError>;

    async fn get(&self, id: Ulid) -> Result<Option<Reservation>, StoreError>;

    async fn by_room(&self, room_id: Ulid) -> Result<Vec<Reservation>, StoreError>;

    async fn by_user(&self, user_id: Ulid) -> Result<Vec<Reservation>, StoreError>;

    async fn by_hotel(&self, hotel_id: Ulid) -> Result<Vec<Reservation>, StoreError>;

    /// Reservations of `room_id` whose stay intersects `[window_start, window_end]`.
    async fn overlapping(
        &self,
        room_id: Ulid,
        window_start: Ms,
        window_end: Ms,
    ) -> Result<Vec<Reservation>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
