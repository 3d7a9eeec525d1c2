use std::time::Instant;

use tracing::{info, warn};
use ulid::Ulid;

use crate::model::*;
use crate::observability::{self, Operation};

use super::validate::{now_ms, validate_reservation};
use super::{ReservationService, ServiceError};

impl ReservationService {
    /// Store a new reservation. The id must not be in use.
    pub async fn add_reservation(&self, reservation: Reservation) -> Result<Reservation, ServiceError> {
        let started = Instant::now();
        let result = self.try_add(reservation).await;
        observability::record(Operation::AddReservation, started, &result);
        match &result {
            Ok(r) => info!(id = %r.id, room_id = %r.room_id, "reservation added"),
            Err(e) => warn!("add reservation rejected: {e}"),
        }
        result
    }

    async fn try_add(&self, mut reservation: Reservation) -> Result<Reservation, ServiceError> {
        validate_reservation(&reservation)?;
        if self.repo.get(reservation.id).await?.is_some() {
            return Err(ServiceError::AlreadyExists(reservation.id));
        }
        if self.repo.count().await? >= self.config.max_reservations {
            return Err(ServiceError::LimitExceeded("too many reservations"));
        }

        let now = now_ms();
        reservation.created_at = now;
        reservation.updated_at = now;
        self.repo.insert(reservation.clone()).await?;
        Ok(reservation)
    }

    /// Overwrite an existing reservation, keeping its original `created_at`.
    pub async fn update_reservation(&self, reservation: Reservation) -> Result<Reservation, ServiceError> {
        let started = Instant::now();
        let result = self.try_update(reservation).await;
        observability::record(Operation::UpdateReservation, started, &result);
        match &result {
            Ok(r) => info!(id = %r.id, "reservation updated"),
            Err(e) => warn!("update reservation rejected: {e}"),
        }
        result
    }

    async fn try_update(&self, mut reservation: Reservation) -> Result<Reservation, ServiceError> {
        validate_reservation(&reservation)?;
        let existing = self
            .repo
            .get(reservation.id)
            .await?
            .ok_or(ServiceError::NotFound(reservation.id))?;

        reservation.created_at = existing.created_at;
        reservation.updated_at = now_ms().max(existing.updated_at);
        self.repo.replace(reservation.clone()).await?;
        Ok(reservation)
    }

    /// Delete a reservation, returning what was removed.
    pub async fn remove_reservation(&self, id: Ulid) -> Result<Reservation, ServiceError> {
        let started = Instant::now();
        let result = self.repo.remove(id).await.map_err(ServiceError::from);
        observability::record(Operation::RemoveReservation, started, &result);
        match &result {
            Ok(_) => info!(%id, "reservation removed"),
            Err(e) => warn!("remove reservation rejected: {e}"),
        }
        result
    }
}
