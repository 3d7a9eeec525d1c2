use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::model::*;

// ── Occupancy Algorithm ───────────────────────────────────────────

/// Number of rooms a room group needs at once to host `stays`.
///
/// `stays` must already be filtered to those intersecting
/// `[window_start, window_end]`; the bounds themselves are not read by the
/// count.
///
/// Sweep in check-out order with a min-heap of active check-outs. Each stay
/// frees at most one room (the earliest checkout, if it is not after the
/// stay's check-in) and then takes one. The answer is the final heap size,
/// not a running maximum. Reported counts must stay reproducible, so keep
/// the remove-at-most-one-then-insert reduction exactly as it is.
pub fn max_concurrent_occupancy(stays: &[Stay], window_start: Ms, window_end: Ms) -> usize {
    tracing::trace!(window_start, window_end, stays = stays.len(), "counting occupancy");

    let mut sorted = stays.to_vec();
    sorted.sort_by_key(|s| (s.check_out, s.check_in));

    let Some((first, rest)) = sorted.split_first() else {
        return 0;
    };

    let mut active: BinaryHeap<Reverse<Ms>> = BinaryHeap::with_capacity(sorted.len());
    active.push(Reverse(first.check_out));

    for stay in rest {
        if let Some(&Reverse(earliest_out)) = active.peek()
            && stay.check_in >= earliest_out
        {
            active.pop();
        }
        active.push(Reverse(stay.check_out));
    }

    active.len()
}
