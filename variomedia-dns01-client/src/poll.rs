//! Bounded job polling.
//!
//! The API is fire-and-forget: a mutation answers with a queue job that
//! has to be polled until it settles. [`poll_until`] turns that into a
//! blocking primitive with a fixed iteration budget, so a job that never
//! leaves `pending` surfaces as an error instead of an infinite loop.

use std::future::Future;
use std::time::Duration;

/// Outcome of a bounded poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The state stopped matching the pending predicate within the budget.
    Settled(T),
    /// The budget ran out; carries the last observed state.
    Exhausted(T),
}

/// Re-fetches `state` while `is_pending` holds, at most `max_attempts`
/// times, sleeping `delay` before each re-fetch.
///
/// A state that is already settled returns without sleeping. Errors from
/// `refetch` abort the loop immediately; settling on a *non-success*
/// terminal state is the caller's concern, not this combinator's.
pub(crate) async fn poll_until<T, E, P, F, Fut>(
    max_attempts: u32,
    delay: Duration,
    mut state: T,
    is_pending: P,
    mut refetch: F,
) -> std::result::Result<PollOutcome<T>, E>
where
    P: Fn(&T) -> bool,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    if !is_pending(&state) {
        return Ok(PollOutcome::Settled(state));
    }

    for _ in 0..max_attempts {
        tokio::time::sleep(delay).await;
        state = refetch(state).await?;
        if !is_pending(&state) {
            return Ok(PollOutcome::Settled(state));
        }
    }

    Ok(PollOutcome::Exhausted(state))
}
