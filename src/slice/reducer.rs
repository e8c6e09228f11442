//! Reducer for collection slices.
//!
//! Fetch completions are fenced by request id: only the completion of the
//! most recently started fetch is applied.

use std::marker::PhantomData;

use crate::mvi::Reducer;
use crate::resource::{InsertAt, Resource};

use super::intent::SliceIntent;
use super::state::{LoadState, RequestId, ResourceSlice};

pub struct SliceReducer<R>(PhantomData<R>);

impl<R: Resource> Reducer for SliceReducer<R> {
    type State = ResourceSlice<R>;
    type Intent = SliceIntent<R>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SliceIntent::FetchStarted { request } => ResourceSlice {
                status: LoadState::Pending,
                error: None,
                in_flight: Some(request),
                ..state
            },

            SliceIntent::FetchSucceeded { request, items } => {
                if !is_current(&state, request) {
                    return state;
                }
                ResourceSlice {
                    items,
                    status: LoadState::Fulfilled,
                    error: None,
                    in_flight: None,
                }
            }

            SliceIntent::FetchFailed { request, message } => {
                if !is_current(&state, request) {
                    return state;
                }
                ResourceSlice {
                    status: LoadState::Rejected,
                    error: Some(message),
                    in_flight: None,
                    ..state
                }
            }

            SliceIntent::Received { item } => upsert(state, item, InsertAt::Back),

            SliceIntent::Created { item } => write_settled(upsert(state, item, R::INSERT_AT)),

            SliceIntent::Updated { item } => {
                let mut state = state;
                if let Some(index) = state.position(item.id()) {
                    state.items[index] = item;
                }
                write_settled(state)
            }

            SliceIntent::Removed { id } => {
                let mut state = state;
                state.items.retain(|item| item.id() != id);
                write_settled(state)
            }

            SliceIntent::WriteFailed { message } => ResourceSlice {
                error: Some(message),
                ..state
            },

            SliceIntent::Reset => ResourceSlice::default(),
        }
    }
}

fn is_current<R>(state: &ResourceSlice<R>, request: RequestId) -> bool {
    let current = state.in_flight == Some(request);
    if !current {
        tracing::debug!(
            request = request.0,
            in_flight = ?state.in_flight.map(|r| r.0),
            "Dropping stale fetch completion"
        );
    }
    current
}

/// A confirmed write clears the last write error. A rejected fetch keeps
/// its message until the next fetch settles.
fn write_settled<R>(mut state: ResourceSlice<R>) -> ResourceSlice<R> {
    if state.status != LoadState::Rejected {
        state.error = None;
    }
    state
}

/// Replace a record with the same id in place, otherwise insert it.
fn upsert<R: Resource>(mut state: ResourceSlice<R>, item: R, at: InsertAt) -> ResourceSlice<R> {
    match state.position(item.id()) {
        Some(index) => state.items[index] = item,
        None => match at {
            InsertAt::Front => state.items.insert(0, item),
            InsertAt::Back => state.items.push(item),
        },
    }
    state
}
