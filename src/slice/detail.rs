//! Single-object slices (weather, farm profile).

use std::marker::PhantomData;

use crate::mvi::{Intent, Reducer, SliceState};
use crate::resource::Detail;

use super::state::{LoadState, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailSlice<T> {
    pub value: Option<T>,
    pub status: LoadState,
    pub error: Option<String>,
    pub(crate) in_flight: Option<RequestId>,
}

impl<T> Default for DetailSlice<T> {
    fn default() -> Self {
        Self {
            value: None,
            status: LoadState::Idle,
            error: None,
            in_flight: None,
        }
    }
}

impl<T: Detail> SliceState for DetailSlice<T> {}

#[derive(Debug, Clone)]
pub enum DetailIntent<T> {
    FetchStarted { request: RequestId },
    FetchSucceeded { request: RequestId, value: T },
    FetchFailed { request: RequestId, message: String },
    Reset,
}

impl<T: Detail> Intent for DetailIntent<T> {}

pub struct DetailReducer<T>(PhantomData<T>);

impl<T: Detail> Reducer for DetailReducer<T> {
    type State = DetailSlice<T>;
    type Intent = DetailIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DetailIntent::FetchStarted { request } => DetailSlice {
                status: LoadState::Pending,
                error: None,
                in_flight: Some(request),
                ..state
            },

            DetailIntent::FetchSucceeded { request, value } if state.in_flight == Some(request) => {
                DetailSlice {
                    value: Some(value),
                    status: LoadState::Fulfilled,
                    error: None,
                    in_flight: None,
                }
            }

            DetailIntent::FetchFailed { request, message } if state.in_flight == Some(request) => {
                DetailSlice {
                    status: LoadState::Rejected,
                    error: Some(message),
                    in_flight: None,
                    ..state
                }
            }

            // Stale completion
            DetailIntent::FetchSucceeded { .. } | DetailIntent::FetchFailed { .. } => state,

            DetailIntent::Reset => DetailSlice::default(),
        }
    }
}
