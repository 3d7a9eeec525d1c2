use crate::limits::*;
use crate::model::*;

use super::ServiceError;

pub(crate) fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Ms)
        .unwrap_or(0)
}

pub(crate) fn validate_stay(stay: &Stay) -> Result<(), ServiceError> {
    if !stay.is_valid() {
        return Err(ServiceError::InvalidStay {
            check_in: stay.check_in,
            check_out: stay.check_out,
        });
    }
    if stay.check_in < MIN_VALID_TIMESTAMP_MS || stay.check_out > MAX_VALID_TIMESTAMP_MS {
        return Err(ServiceError::LimitExceeded("timestamp out of range"));
    }
    if stay.duration_ms() > MAX_STAY_DURATION_MS {
        return Err(ServiceError::LimitExceeded("stay too long"));
    }
    Ok(())
}

pub(crate) fn validate_reservation(r: &Reservation) -> Result<(), ServiceError> {
    validate_stay(&r.stay)?;
    if r.people_count == 0 {
        return Err(ServiceError::InvalidReservation("people_count must be at least 1"));
    }
    if r.people_count > MAX_PEOPLE_PER_RESERVATION {
        return Err(ServiceError::LimitExceeded("too many people"));
    }
    if r.total_price < 0 {
        return Err(ServiceError::InvalidReservation("negative total_price"));
    }
    if r.paid_amount < 0 {
        return Err(ServiceError::InvalidReservation("negative paid_amount"));
    }
    Ok(())
}

/// Window bounds are closed; `start == end` asks about a single instant.
pub(crate) fn validate_window(start: Ms, end: Ms, max_width: Ms) -> Result<(), ServiceError> {
    if start > end {
        return Err(ServiceError::InvalidWindow { start, end });
    }
    if end.checked_sub(start).is_none_or(|width| width > max_width) {
        return Err(ServiceError::LimitExceeded("query window too wide"));
    }
    Ok(())
}
