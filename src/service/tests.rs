use super::*;
use crate::limits::*;
use crate::model::*;
use crate::repository::{InMemoryRepository, StoreError};

use async_trait::async_trait;
use ulid::Ulid;

const D: Ms = 86_400_000; // 1 day in ms
const JAN_2030: Ms = 1_893_456_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn service() -> ReservationService {
    init_tracing();
    ReservationService::new(Arc::new(InMemoryRepository::new()), ServiceConfig::default())
}

fn service_with(config: ServiceConfig) -> ReservationService {
    init_tracing();
    ReservationService::new(Arc::new(InMemoryRepository::new()), config)
}

/// Reservation for `room_id` from day `from` to day `to` after 2030-01-01.
fn nights(room_id: Ulid, from: i64, to: i64) -> Reservation {
    Reservation::new(
        Ulid::new(),
        Ulid::new(),
        Ulid::new(),
        room_id,
        Stay::new(JAN_2030 + from * D, JAN_2030 + to * D),
        2,
        12_000 * (to - from),
    )
}

// ── CRUD ─────────────────────────────────────────────────

#[tokio::test]
async fn add_then_get() {
    let svc = service();
    let r = nights(Ulid::new(), 0, 2);

    let stored = svc.add_reservation(r.clone()).await.unwrap();
    assert!(stored.created_at > 0);
    assert_eq!(stored.created_at, stored.updated_at);

    let fetched = svc.get_reservation(r.id).await.unwrap();
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn add_existing_id_rejected() {
    let svc = service();
    let r = nights(Ulid::new(), 0, 2);
    svc.add_reservation(r.clone()).await.unwrap();

    let result = svc.add_reservation(r.clone()).await;
    assert_eq!(result, Err(ServiceError::AlreadyExists(r.id)));
}

#[tokio::test]
async fn add_invalid_stay_rejected() {
    let svc = service();
    let mut r = nights(Ulid::new(), 0, 2);
    r.stay = Stay::new(r.stay.check_out, r.stay.check_in);

    let result = svc.add_reservation(r.clone()).await;
    assert!(matches!(result, Err(ServiceError::InvalidStay { .. })));
    assert!(matches!(svc.get_reservation(r.id).await, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn add_respects_capacity_limit() {
    let svc = service_with(ServiceConfig {
        max_reservations: 2,
        ..ServiceConfig::default()
    });
    let room = Ulid::new();
    svc.add_reservation(nights(room, 0, 1)).await.unwrap();
    svc.add_reservation(nights(room, 1, 2)).await.unwrap();

    let result = svc.add_reservation(nights(room, 2, 3)).await;
    assert_eq!(result, Err(ServiceError::LimitExceeded("too many reservations")));
}

#[tokio::test]
async fn update_keeps_created_at() {
    let svc = service();
    let r = nights(Ulid::new(), 0, 2);
    let stored = svc.add_reservation(r.clone()).await.unwrap();

    let changed = Reservation {
        people_count: 3,
        paid_amount: 5_000,
        created_at: 42,
        ..r
    };
    let updated = svc.update_reservation(changed).await.unwrap();
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at >= stored.updated_at);
    assert_eq!(updated.people_count, 3);

    let fetched = svc.get_reservation(updated.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let svc = service();
    let r = nights(Ulid::new(), 0, 2);
    let result = svc.update_reservation(r.clone()).await;
    assert_eq!(result, Err(ServiceError::NotFound(r.id)));
}

#[tokio::test]
async fn update_moves_room() {
    let svc = service();
    let (room_a, room_b) = (Ulid::new(), Ulid::new());
    let r = nights(room_a, 0, 2);
    svc.add_reservation(r.clone()).await.unwrap();

    svc.update_reservation(Reservation { room_id: room_b, ..r })
        .await
        .unwrap();

    assert!(svc.reservations_by_room(room_a).await.unwrap().is_empty());
    assert_eq!(svc.reservations_by_room(room_b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_then_get_is_not_found() {
    let svc = service();
    let r = nights(Ulid::new(), 0, 2);
    svc.add_reservation(r.clone()).await.unwrap();

    let removed = svc.remove_reservation(r.id).await.unwrap();
    assert_eq!(removed.id, r.id);
    assert_eq!(svc.get_reservation(r.id).await, Err(ServiceError::NotFound(r.id)));
    assert_eq!(svc.remove_reservation(r.id).await, Err(ServiceError::NotFound(r.id)));
}

#[tokio::test]
async fn listings_by_room_user_hotel() {
    let svc = service();
    let (room, user, hotel) = (Ulid::new(), Ulid::new(), Ulid::new());

    let first = Reservation { user_id: user, hotel_id: hotel, ..nights(room, 0, 2) };
    let second = Reservation { user_id: user, ..nights(Ulid::new(), 3, 4) };
    let third = Reservation { hotel_id: hotel, ..nights(room, 5, 6) };
    for r in [&third, &first, &second] {
        svc.add_reservation(r.clone()).await.unwrap();
    }

    let ids = |rs: Vec<Reservation>| rs.into_iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids(svc.reservations_by_room(room).await.unwrap()), vec![first.id, third.id]);
    assert_eq!(ids(svc.reservations_by_user(user).await.unwrap()), vec![first.id, second.id]);
    assert_eq!(ids(svc.reservations_by_hotel(hotel).await.unwrap()), vec![first.id, third.id]);
    assert!(svc.reservations_by_user(Ulid::new()).await.unwrap().is_empty());
}

// ── Occupancy ────────────────────────────────────────────

#[tokio::test]
async fn occupancy_empty_room_is_zero() {
    let svc = service();
    let room = Ulid::new();
    let occ = svc.using_room_count(room, JAN_2030, JAN_2030 + 7 * D).await.unwrap();
    assert_eq!(
        occ,
        RoomOccupancy {
            room_id: room,
            window_start: JAN_2030,
            window_end: JAN_2030 + 7 * D,
            rooms_in_use: 0,
        }
    );
}

#[tokio::test]
async fn occupancy_counts_overlapping_stays() {
    let svc = service();
    let room = Ulid::new();
    for (from, to) in [(1, 5), (2, 6), (7, 9)] {
        svc.add_reservation(nights(room, from, to)).await.unwrap();
    }
    let occ = svc.using_room_count(room, JAN_2030, JAN_2030 + 10 * D).await.unwrap();
    assert_eq!(occ.rooms_in_use, 2);
}

#[tokio::test]
async fn occupancy_back_to_back_needs_one_room() {
    let svc = service();
    let room = Ulid::new();
    for (from, to) in [(1, 2), (2, 3), (3, 4)] {
        svc.add_reservation(nights(room, from, to)).await.unwrap();
    }
    let occ = svc.using_room_count(room, JAN_2030, JAN_2030 + 5 * D).await.unwrap();
    assert_eq!(occ.rooms_in_use, 1);
}

#[tokio::test]
async fn occupancy_ignores_stays_outside_window_and_room() {
    let svc = service();
    let room = Ulid::new();
    // Inside the window [day 10, day 12]
    svc.add_reservation(nights(room, 9, 11)).await.unwrap();
    // Leaves exactly when the window opens: not counted
    svc.add_reservation(nights(room, 8, 10)).await.unwrap();
    // Far future
    svc.add_reservation(nights(room, 20, 25)).await.unwrap();
    // Same dates, other room group
    svc.add_reservation(nights(Ulid::new(), 9, 11)).await.unwrap();

    let occ = svc
        .using_room_count(room, JAN_2030 + 10 * D, JAN_2030 + 12 * D)
        .await
        .unwrap();
    assert_eq!(occ.rooms_in_use, 1);
}

#[tokio::test]
async fn occupancy_drops_removed_reservation() {
    let svc = service();
    let room = Ulid::new();
    let a = svc.add_reservation(nights(room, 0, 3)).await.unwrap();
    svc.add_reservation(nights(room, 1, 4)).await.unwrap();

    let window = (JAN_2030, JAN_2030 + 5 * D);
    assert_eq!(svc.using_room_count(room, window.0, window.1).await.unwrap().rooms_in_use, 2);

    svc.remove_reservation(a.id).await.unwrap();
    assert_eq!(svc.using_room_count(room, window.0, window.1).await.unwrap().rooms_in_use, 1);
}

#[tokio::test]
async fn occupancy_single_instant_window() {
    let svc = service();
    let room = Ulid::new();
    svc.add_reservation(nights(room, 0, 2)).await.unwrap();
    let t = JAN_2030 + D;
    let occ = svc.using_room_count(room, t, t).await.unwrap();
    assert_eq!(occ.rooms_in_use, 1);
}

#[tokio::test]
async fn occupancy_reversed_window_rejected() {
    let svc = service();
    let result = svc.using_room_count(Ulid::new(), JAN_2030 + D, JAN_2030).await;
    assert_eq!(
        result,
        Err(ServiceError::InvalidWindow {
            start: JAN_2030 + D,
            end: JAN_2030
        })
    );
}

#[tokio::test]
async fn occupancy_window_width_limited() {
    let svc = service_with(ServiceConfig {
        max_query_window_ms: 7 * D,
        ..ServiceConfig::default()
    });
    let result = svc.using_room_count(Ulid::new(), JAN_2030, JAN_2030 + 8 * D).await;
    assert_eq!(result, Err(ServiceError::LimitExceeded("query window too wide")));
    assert!(svc.config().max_query_window_ms < MAX_QUERY_WINDOW_MS);
}

#[tokio::test]
async fn occupancy_full_range_window_rejected() {
    let svc = service();
    let result = svc.using_room_count(Ulid::new(), Ms::MIN, Ms::MAX).await;
    assert_eq!(result, Err(ServiceError::LimitExceeded("query window too wide")));
}

// ── Store failures ───────────────────────────────────────

struct BrokenRepository;

#[async_trait]
impl ReservationRepository for BrokenRepository {
    async fn insert(&self, _: Reservation) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk on fire".into()))
    }
    async fn replace(&self, _: Reservation) -> Result<Reservation, StoreError> {
        Err(StoreError::Backend("disk on fire".into()))
    }
    async fn remove(&self, _: Ulid) -> Result<Reservation, StoreError> {
        Err(StoreError::Backend("disk on fire".into()))
    }
    async fn get(&self, _: Ulid) -> Result<Option<Reservation>, StoreError> {
        Ok(None)
    }
    async fn by_room(&self, _: Ulid) -> Result<Vec<Reservation>, StoreError> {
        Err(StoreError::Backend("disk on fire".into()))
    }
    async fn by_user(&self, _: Ulid) -> Result<Vec<Reservation>, StoreError> {
        Err(StoreError::Backend("disk on fire".into()))
    }
    async fn by_hotel(&self, _: Ulid) -> Result<Vec<Reservation>, StoreError> {
        Err(StoreError::Backend("disk on fire".into()))
    }
    async fn overlapping(&self, _: Ulid, _: Ms, _: Ms) -> Result<Vec<Reservation>, StoreError> {
        Err(StoreError::Backend("disk on fire".into()))
    }
    async fn count(&self) -> Result<usize, StoreError> {
        Ok(0)
    }
}

#[tokio::test]
async fn backend_errors_surface_as_store_errors() {
    init_tracing();
    let svc = ReservationService::new(Arc::new(BrokenRepository), ServiceConfig::default());

    let add = svc.add_reservation(nights(Ulid::new(), 0, 1)).await;
    assert_eq!(add, Err(ServiceError::Store("disk on fire".into())));

    let occ = svc.using_room_count(Ulid::new(), JAN_2030, JAN_2030 + D).await;
    assert!(matches!(occ, Err(ServiceError::Store(_))));
    assert!(occ.unwrap_err().to_string().contains("disk on fire"));
}

#[test]
fn store_errors_map_to_service_errors() {
    let id = Ulid::new();
    assert_eq!(ServiceError::from(StoreError::Duplicate(id)), ServiceError::AlreadyExists(id));
    assert_eq!(ServiceError::from(StoreError::Missing(id)), ServiceError::NotFound(id));
    assert_eq!(
        ServiceError::from(StoreError::Backend("x".into())),
        ServiceError::Store("x".into())
    );
}
