use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use ulid::Ulid;

use crate::model::*;

use super::{ReservationRepository, StoreError};

#[derive(Debug, Clone, Copy)]
struct RoomEntry {
    id: Ulid,
    stay: Stay,
}

/// Reservations held in memory, indexed by room, user and hotel.
pub struct InMemoryRepository {
    reservations: DashMap<Ulid, Reservation>,
    /// Room → entries sorted by `stay.check_in`.
    rooms: DashMap<Ulid, Vec<RoomEntry>>,
    users: DashMap<Ulid, Vec<Ulid>>,
    hotels: DashMap<Ulid, Vec<Ulid>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
            rooms: DashMap::new(),
            users: DashMap::new(),
            hotels: DashMap::new(),
        }
    }

    // ── Indexes ──────────────────────────────────────────────

    fn index(&self, r: &Reservation) {
        let mut entries = self.rooms.entry(r.room_id).or_default();
        let pos = entries.partition_point(|e| e.stay.check_in <= r.stay.check_in);
        entries.insert(pos, RoomEntry { id: r.id, stay: r.stay });
        drop(entries);

        self.users.entry(r.user_id).or_default().push(r.id);
        self.hotels.entry(r.hotel_id).or_default().push(r.id);
    }

    fn unindex(&self, r: &Reservation) {
        if let Some(mut entries) = self.rooms.get_mut(&r.room_id) {
            entries.retain(|e| e.id != r.id);
        }
        if let Some(mut ids) = self.users.get_mut(&r.user_id) {
            ids.retain(|id| *id != r.id);
        }
        if let Some(mut ids) = self.hotels.get_mut(&r.hotel_id) {
            ids.retain(|id| *id != r.id);
        }
    }

    /// Look up ids in the primary map, skipping any removed concurrently.
    fn resolve(&self, ids: &[Ulid]) -> Vec<Reservation> {
        ids.iter()
            .filter_map(|id| self.reservations.get(id).map(|e| e.value().clone()))
            .collect()
    }

    fn resolve_sorted(&self, ids: &[Ulid]) -> Vec<Reservation> {
        let mut found = self.resolve(ids);
        found.sort_by_key(|r| (r.stay.check_in, r.id));
        found
    }

    fn ids_in(index: &DashMap<Ulid, Vec<Ulid>>, key: &Ulid) -> Vec<Ulid> {
        index
            .get(key)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepository {
    // Index maintenance runs while the primary entry is locked, so writers
    // of the same id never interleave their index updates.
    async fn insert(&self, reservation: Reservation) -> Result<(), StoreError> {
        match self.reservations.entry(reservation.id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(reservation.id)),
            Entry::Vacant(slot) => {
                self.index(&reservation);
                slot.insert(reservation);
                Ok(())
            }
        }
    }

    async fn replace(&self, reservation: Reservation) -> Result<Reservation, StoreError> {
        match self.reservations.get_mut(&reservation.id) {
            Some(mut slot) => {
                self.unindex(slot.value());
                self.index(&reservation);
                Ok(std::mem::replace(slot.value_mut(), reservation))
            }
            None => Err(StoreError::Missing(reservation.id)),
        }
    }

    async fn remove(&self, id: Ulid) -> Result<Reservation, StoreError> {
        match self.reservations.entry(id) {
            Entry::Occupied(slot) => {
                self.unindex(slot.get());
                Ok(slot.remove())
            }
            Entry::Vacant(_) => Err(StoreError::Missing(id)),
        }
    }

    async fn get(&self, id: Ulid) -> Result<Option<Reservation>, StoreError> {
        Ok(self.reservations.get(&id).map(|e| e.value().clone()))
    }

    async fn by_room(&self, room_id: Ulid) -> Result<Vec<Reservation>, StoreError> {
        let ids: Vec<Ulid> = self
            .rooms
            .get(&room_id)
            .map(|entries| entries.iter().map(|e| e.id).collect())
            .unwrap_or_default();
        Ok(self.resolve(&ids))
    }

    async fn by_user(&self, user_id: Ulid) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.resolve_sorted(&Self::ids_in(&self.users, &user_id)))
    }

    async fn by_hotel(&self, hotel_id: Ulid) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.resolve_sorted(&Self::ids_in(&self.hotels, &hotel_id)))
    }

    async fn overlapping(
        &self,
        room_id: Ulid,
        window_start: Ms,
        window_end: Ms,
    ) -> Result<Vec<Reservation>, StoreError> {
        let ids: Vec<Ulid> = match self.rooms.get(&room_id) {
            Some(guard) => {
                let entries = guard.value();
                // Everything at index >= right_bound checks in after the window closes.
                let right_bound = entries.partition_point(|e| e.stay.check_in <= window_end);
                entries[..right_bound]
                    .iter()
                    .filter(|e| e.stay.intersects_window(window_start, window_end))
                    .map(|e| e.id)
                    .collect()
            }
            None => return Ok(Vec::new()),
        };
        Ok(self.resolve(&ids))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.reservations.len())
    }
}
