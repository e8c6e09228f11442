//! Resource operations: one REST call each, results fed through the slice
//! reducers.

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use super::{dispatch_mvi, AppState, Store};
use crate::api::{ApiError, Payload};
use crate::mvi::Reducer;
use crate::resource::{
    Animal, Detail, Expense, FarmDocument, FarmProfile, ForumPost, HealthAssessment,
    InventoryItem, Listing, Resource, RevenueEntry, Schedule, Sensor, WeatherForecast, COMPLETED,
};
use crate::slice::{
    DetailIntent, DetailReducer, DetailSlice, ResourceSlice, SliceIntent, SliceReducer,
};

/// Locates a collection type's slice inside [`AppState`].
pub trait StoreSlice: Resource {
    fn slice(state: &AppState) -> &ResourceSlice<Self>;
    fn slice_mut(state: &mut AppState) -> &mut ResourceSlice<Self>;
}

/// Locates a detail type's slice inside [`AppState`].
pub trait StoreDetail: Detail {
    fn slice(state: &AppState) -> &DetailSlice<Self>;
    fn slice_mut(state: &mut AppState) -> &mut DetailSlice<Self>;
}

macro_rules! store_slice {
    ($ty:ty, $field:ident) => {
        impl StoreSlice for $ty {
            fn slice(state: &AppState) -> &ResourceSlice<Self> {
                &state.$field
            }

            fn slice_mut(state: &mut AppState) -> &mut ResourceSlice<Self> {
                &mut state.$field
            }
        }
    };
}

store_slice!(Animal, animals);
store_slice!(Schedule, schedules);
store_slice!(InventoryItem, inventory);
store_slice!(Listing, marketplace);
store_slice!(Sensor, sensors);
store_slice!(HealthAssessment, health);
store_slice!(Expense, expenses);
store_slice!(RevenueEntry, revenue);
store_slice!(ForumPost, posts);
store_slice!(FarmDocument, documents);

impl StoreDetail for WeatherForecast {
    fn slice(state: &AppState) -> &DetailSlice<Self> {
        &state.weather
    }

    fn slice_mut(state: &mut AppState) -> &mut DetailSlice<Self> {
        &mut state.weather
    }
}

impl StoreDetail for FarmProfile {
    fn slice(state: &AppState) -> &DetailSlice<Self> {
        &state.farm
    }

    fn slice_mut(state: &mut AppState) -> &mut DetailSlice<Self> {
        &mut state.farm
    }
}

impl AppState {
    /// Return every resource and detail slice to idle. Auth is untouched.
    pub(crate) fn reset_data(&mut self) {
        dispatch_mvi!(self, animals, SliceReducer<Animal>, SliceIntent::Reset);
        dispatch_mvi!(self, schedules, SliceReducer<Schedule>, SliceIntent::Reset);
        dispatch_mvi!(self, inventory, SliceReducer<InventoryItem>, SliceIntent::Reset);
        dispatch_mvi!(self, marketplace, SliceReducer<Listing>, SliceIntent::Reset);
        dispatch_mvi!(self, sensors, SliceReducer<Sensor>, SliceIntent::Reset);
        dispatch_mvi!(self, health, SliceReducer<HealthAssessment>, SliceIntent::Reset);
        dispatch_mvi!(self, expenses, SliceReducer<Expense>, SliceIntent::Reset);
        dispatch_mvi!(self, revenue, SliceReducer<RevenueEntry>, SliceIntent::Reset);
        dispatch_mvi!(self, posts, SliceReducer<ForumPost>, SliceIntent::Reset);
        dispatch_mvi!(self, documents, SliceReducer<FarmDocument>, SliceIntent::Reset);
        dispatch_mvi!(self, weather, DetailReducer<WeatherForecast>, DetailIntent::Reset);
        dispatch_mvi!(self, farm, DetailReducer<FarmProfile>, DetailIntent::Reset);
    }
}

impl Store {
    /// Apply an intent to the slice for `R`.
    pub fn dispatch<R: StoreSlice>(&self, intent: SliceIntent<R>) {
        self.state.send_modify(|state| {
            let slice = R::slice_mut(state);
            *slice = SliceReducer::<R>::reduce(std::mem::take(slice), intent);
        });
    }

    /// Apply an intent to the detail slice for `T`.
    pub fn dispatch_detail<T: StoreDetail>(&self, intent: DetailIntent<T>) {
        self.state.send_modify(|state| {
            let slice = T::slice_mut(state);
            *slice = DetailReducer::<T>::reduce(std::mem::take(slice), intent);
        });
    }

    /// Clone of the slice for `R`.
    pub fn slice<R: StoreSlice>(&self) -> ResourceSlice<R> {
        self.select(|state| R::slice(state).clone())
    }

    pub fn detail<T: StoreDetail>(&self) -> DetailSlice<T> {
        self.select(|state| T::slice(state).clone())
    }

    /// `GET /api/<resource>`; replaces the collection on success.
    pub async fn fetch<R: StoreSlice>(&self, query: &[(&str, &str)]) -> Result<Vec<R>, ApiError> {
        self.fetch_with_cancel(query, &CancellationToken::new()).await
    }

    /// Like [`Store::fetch`], but settles as rejected as soon as `cancel`
    /// fires.
    pub async fn fetch_with_cancel<R: StoreSlice>(
        &self,
        query: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Vec<R>, ApiError> {
        let request = self.next_request_id();
        tracing::debug!(resource = R::NAME, request = request.0, "Fetch started");
        self.dispatch::<R>(SliceIntent::FetchStarted { request });

        let token = self.token();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = self.client.get::<Vec<R>>(R::PATH, query, token.as_deref()) => result,
        };

        match result {
            Ok(items) => {
                tracing::debug!(
                    resource = R::NAME,
                    request = request.0,
                    count = items.len(),
                    "Fetch fulfilled"
                );
                self.dispatch::<R>(SliceIntent::FetchSucceeded {
                    request,
                    items: items.clone(),
                });
                Ok(items)
            }
            Err(err) => {
                tracing::warn!(
                    resource = R::NAME,
                    request = request.0,
                    error_type = err.error_type(),
                    error = %err,
                    "Fetch rejected"
                );
                self.dispatch::<R>(SliceIntent::FetchFailed {
                    request,
                    message: err.user_message(),
                });
                self.invalidate_on_unauthorized(&err);
                Err(err)
            }
        }
    }

    /// `GET /api/<resource>/:id`; upserts the record without touching the
    /// load state.
    pub async fn fetch_one<R: StoreSlice>(&self, id: &str) -> Result<R, ApiError> {
        let token = self.token();
        match self.client.get::<R>(&R::item_path(id), &[], token.as_deref()).await {
            Ok(item) => {
                self.dispatch::<R>(SliceIntent::Received { item: item.clone() });
                Ok(item)
            }
            Err(err) => {
                tracing::warn!(resource = R::NAME, id, error = %err, "Fetch by id failed");
                self.invalidate_on_unauthorized(&err);
                Err(err)
            }
        }
    }

    /// `POST /api/<resource>`; inserts the server's record on success.
    pub async fn create<R: StoreSlice>(&self, payload: &Payload) -> Result<R, ApiError> {
        let result = self.write::<R>(Method::POST, R::PATH, payload).await;
        self.settle_write(result, |item| SliceIntent::Created { item })
    }

    /// `PUT /api/<resource>/:id`; replaces the record in place.
    pub async fn update<R: StoreSlice>(&self, id: &str, payload: &Payload) -> Result<R, ApiError> {
        let result = self.write::<R>(Method::PUT, &R::item_path(id), payload).await;
        self.settle_write(result, |item| SliceIntent::Updated { item })
    }

    /// `PATCH /api/<resource>/:id`; replaces the record in place.
    pub async fn patch<R: StoreSlice>(&self, id: &str, payload: &Payload) -> Result<R, ApiError> {
        let result = self.write::<R>(Method::PATCH, &R::item_path(id), payload).await;
        self.settle_write(result, |item| SliceIntent::Updated { item })
    }

    /// `DELETE /api/<resource>/:id`; splices the record out on success.
    pub async fn remove<R: StoreSlice>(&self, id: &str) -> Result<(), ApiError> {
        let token = self.token();
        match self.client.delete(&R::item_path(id), token.as_deref()).await {
            Ok(()) => {
                tracing::info!(resource = R::NAME, id, "Removed");
                self.dispatch::<R>(SliceIntent::Removed { id: id.to_string() });
                Ok(())
            }
            Err(err) => Err(self.record_write_failure::<R>(err)),
        }
    }

    /// Mark a schedule as done.
    pub async fn complete_schedule(&self, id: &str) -> Result<Schedule, ApiError> {
        let payload = Payload::new().field("status", COMPLETED);
        self.patch::<Schedule>(id, &payload).await
    }

    /// `GET /api/<detail>`; replaces the value on success and keeps the
    /// previous one on failure.
    pub async fn fetch_detail<T: StoreDetail>(&self) -> Result<T, ApiError> {
        let request = self.next_request_id();
        self.dispatch_detail::<T>(DetailIntent::FetchStarted { request });

        let token = self.token();
        match self.client.get::<T>(T::PATH, &[], token.as_deref()).await {
            Ok(value) => {
                self.dispatch_detail::<T>(DetailIntent::FetchSucceeded {
                    request,
                    value: value.clone(),
                });
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(detail = T::NAME, error = %err, "Fetch rejected");
                self.dispatch_detail::<T>(DetailIntent::FetchFailed {
                    request,
                    message: err.user_message(),
                });
                self.invalidate_on_unauthorized(&err);
                Err(err)
            }
        }
    }

    async fn write<R: StoreSlice>(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
    ) -> Result<R, ApiError> {
        tracing::debug!(
            resource = R::NAME,
            method = %method,
            multipart = payload.is_multipart(),
            "Write dispatched"
        );
        let token = self.token();
        self.client.send::<R>(method, path, payload, token.as_deref()).await
    }

    fn settle_write<R: StoreSlice>(
        &self,
        result: Result<R, ApiError>,
        confirmed: impl FnOnce(R) -> SliceIntent<R>,
    ) -> Result<R, ApiError> {
        match result {
            Ok(item) => {
                tracing::info!(resource = R::NAME, id = item.id(), "Write confirmed");
                self.dispatch::<R>(confirmed(item.clone()));
                Ok(item)
            }
            Err(err) => Err(self.record_write_failure::<R>(err)),
        }
    }

    fn record_write_failure<R: StoreSlice>(&self, err: ApiError) -> ApiError {
        tracing::warn!(
            resource = R::NAME,
            error_type = err.error_type(),
            error = %err,
            "Write failed"
        );
        self.dispatch::<R>(SliceIntent::WriteFailed {
            message: err.user_message(),
        });
        self.invalidate_on_unauthorized(&err);
        err
    }
}
