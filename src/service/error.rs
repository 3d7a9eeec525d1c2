use ulid::Ulid;

use crate::model::Ms;
use crate::repository::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    NotFound(Ulid),
    AlreadyExists(Ulid),
    InvalidStay { check_in: Ms, check_out: Ms },
    InvalidWindow { start: Ms, end: Ms },
    InvalidReservation(&'static str),
    LimitExceeded(&'static str),
    Store(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(id) => write!(f, "reservation not found: {id}"),
            ServiceError::AlreadyExists(id) => write!(f, "reservation already exists: {id}"),
            ServiceError::InvalidStay { check_in, check_out } => {
                write!(f, "check-in {check_in} must be before check-out {check_out}")
            }
            ServiceError::InvalidWindow { start, end } => {
                write!(f, "window start {start} is after window end {end}")
            }
            ServiceError::InvalidReservation(msg) => write!(f, "invalid reservation: {msg}"),
            ServiceError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            ServiceError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(id) => ServiceError::AlreadyExists(id),
            StoreError::Missing(id) => ServiceError::NotFound(id),
            StoreError::Backend(msg) => ServiceError::Store(msg),
        }
    }
}
