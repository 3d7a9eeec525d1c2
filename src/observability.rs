// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total service operations. Labels: operation, status.
pub const OPERATIONS_TOTAL: &str = "innkeep_operations_total";

/// Histogram: operation latency in seconds. Labels: operation.
pub const OPERATION_DURATION_SECONDS: &str = "innkeep_operation_duration_seconds";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: rooms in use from the last occupancy query. Labels: room_id.
pub const ROOMS_IN_USE: &str = "innkeep_rooms_in_use";

/// Service operations, as reported in metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddReservation,
    UpdateReservation,
    RemoveReservation,
    GetReservation,
    ReservationsByRoom,
    ReservationsByUser,
    ReservationsByHotel,
    UsingRoomCount,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::AddReservation => "add_reservation",
            Operation::UpdateReservation => "update_reservation",
            Operation::RemoveReservation => "remove_reservation",
            Operation::GetReservation => "get_reservation",
            Operation::ReservationsByRoom => "reservations_by_room",
            Operation::ReservationsByUser => "reservations_by_user",
            Operation::ReservationsByHotel => "reservations_by_hotel",
            Operation::UsingRoomCount => "using_room_count",
        }
    }
}

/// Record one finished operation.
pub fn record<T, E>(op: Operation, started: std::time::Instant, result: &Result<T, E>) {
    let status = if result.is_ok() { "ok" } else { "error" };
    metrics::counter!(OPERATIONS_TOTAL, "operation" => op.label(), "status" => status).increment(1);
    metrics::histogram!(OPERATION_DURATION_SECONDS, "operation" => op.label())
        .record(started.elapsed().as_secs_f64());
}
