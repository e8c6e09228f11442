//! State for a collection slice.

use crate::mvi::SliceState;
use crate::resource::Resource;

/// Async lifecycle of the last fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl LoadState {
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Fulfilled or rejected.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Fulfilled | Self::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Rejected => "rejected",
        }
    }
}

/// Identifies one fetch. Issued by the store in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// A server-backed collection plus the lifecycle of its last fetch.
///
/// `items` only changes in response to confirmed server results; there is
/// no optimistic mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSlice<R> {
    pub items: Vec<R>,
    pub status: LoadState,
    pub error: Option<String>,
    /// Latest fetch started. Completions for any other id are stale.
    pub(crate) in_flight: Option<RequestId>,
}

impl<R> Default for ResourceSlice<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadState::Idle,
            error: None,
            in_flight: None,
        }
    }
}

impl<R: Resource> SliceState for ResourceSlice<R> {}

impl<R: Resource> ResourceSlice<R> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_pending()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}
