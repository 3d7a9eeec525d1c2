use std::time::Instant;

use tracing::{debug, info};
use ulid::Ulid;

use crate::model::*;
use crate::observability::{self, Operation, ROOMS_IN_USE};
use crate::occupancy::max_concurrent_occupancy;

use super::validate::validate_window;
use super::{ReservationService, ServiceError};

impl ReservationService {
    pub async fn get_reservation(&self, id: Ulid) -> Result<Reservation, ServiceError> {
        let started = Instant::now();
        let result = self
            .repo
            .get(id)
            .await
            .map_err(ServiceError::from)
            .and_then(|found| found.ok_or(ServiceError::NotFound(id)));
        observability::record(Operation::GetReservation, started, &result);
        result
    }

    pub async fn reservations_by_room(&self, room_id: Ulid) -> Result<Vec<Reservation>, ServiceError> {
        let started = Instant::now();
        let result = self.repo.by_room(room_id).await.map_err(ServiceError::from);
        observability::record(Operation::ReservationsByRoom, started, &result);
        result
    }

    pub async fn reservations_by_user(&self, user_id: Ulid) -> Result<Vec<Reservation>, ServiceError> {
        let started = Instant::now();
        let result = self.repo.by_user(user_id).await.map_err(ServiceError::from);
        observability::record(Operation::ReservationsByUser, started, &result);
        result
    }

    pub async fn reservations_by_hotel(&self, hotel_id: Ulid) -> Result<Vec<Reservation>, ServiceError> {
        let started = Instant::now();
        let result = self.repo.by_hotel(hotel_id).await.map_err(ServiceError::from);
        observability::record(Operation::ReservationsByHotel, started, &result);
        result
    }

    /// Rooms of a room group in use at once during `[window_start, window_end]`.
    pub async fn using_room_count(
        &self,
        room_id: Ulid,
        window_start: Ms,
        window_end: Ms,
    ) -> Result<RoomOccupancy, ServiceError> {
        let started = Instant::now();
        let result = self.try_using_room_count(room_id, window_start, window_end).await;
        observability::record(Operation::UsingRoomCount, started, &result);
        result
    }

    async fn try_using_room_count(
        &self,
        room_id: Ulid,
        window_start: Ms,
        window_end: Ms,
    ) -> Result<RoomOccupancy, ServiceError> {
        validate_window(window_start, window_end, self.config.max_query_window_ms)?;

        let reservations = self.repo.overlapping(room_id, window_start, window_end).await?;
        for r in &reservations {
            debug!(id = %r.id, check_in = r.stay.check_in, check_out = r.stay.check_out, "overlapping reservation");
        }

        let stays: Vec<Stay> = reservations.iter().map(|r| r.stay).collect();
        let rooms_in_use = max_concurrent_occupancy(&stays, window_start, window_end);

        metrics::gauge!(ROOMS_IN_USE, "room_id" => room_id.to_string()).set(rooms_in_use as f64);
        info!(%room_id, window_start, window_end, rooms_in_use, "room occupancy computed");

        Ok(RoomOccupancy {
            room_id,
            window_start,
            window_end,
            rooms_in_use,
        })
    }
}
