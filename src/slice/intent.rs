//! Intents for collection slices.

use crate::mvi::Intent;
use crate::resource::Resource;

use super::state::RequestId;

#[derive(Debug, Clone)]
pub enum SliceIntent<R> {
    /// A list fetch was dispatched.
    FetchStarted { request: RequestId },

    FetchSucceeded { request: RequestId, items: Vec<R> },

    FetchFailed { request: RequestId, message: String },

    /// A single record fetched by id.
    Received { item: R },

    /// Server confirmed a create.
    Created { item: R },

    /// Server confirmed an update or patch.
    Updated { item: R },

    /// Server confirmed a delete.
    Removed { id: String },

    /// A create/update/patch/delete failed.
    WriteFailed { message: String },

    /// Drop everything (logout).
    Reset,
}

impl<R: Resource> Intent for SliceIntent<R> {}
