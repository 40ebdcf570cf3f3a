//! # Booking Store Client
//!
//! Provides a high-level API for the Order Store actor.
use crate::booking_actor::BookingStoreError;
use crate::clients::actor_client::{downcast_entity_error, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Booking, BookingCreate, BookingId, BookingPage, BookingQuery, StatusChange};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct BookingStoreClient {
    inner: ResourceClient<Booking>,
}

impl BookingStoreClient {
    pub fn new(inner: ResourceClient<Booking>) -> Self {
        Self { inner }
    }

    /// Persists a `PendingPayment` booking. A taken order number comes back as
    /// [`BookingStoreError::DuplicateOrderNo`].
    #[instrument(skip(self, params), fields(order_no = %params.order_no))]
    pub async fn create_booking(&self, params: BookingCreate) -> Result<BookingId, BookingStoreError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn booking(&self, id: BookingId) -> Result<Booking, BookingStoreError> {
        self.get(id)
            .await?
            .ok_or_else(|| BookingStoreError::NotFound(id.to_string()))
    }

    /// Applies a status change if the transition table allows it from the
    /// booking's current status, and returns the updated booking.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: BookingId, change: StatusChange) -> Result<Booking, BookingStoreError> {
        debug!("Sending request");
        self.inner.update(id, change).await.map_err(Self::map_error)
    }

    /// Filters, sorts newest first and paginates.
    pub async fn query(&self, query: BookingQuery) -> Result<BookingPage, BookingStoreError> {
        let items = self.list(query.clone()).await?;
        Ok(query.paginate(items))
    }
}

#[async_trait]
impl ActorClient<Booking> for BookingStoreClient {
    type Error = BookingStoreError;

    fn inner(&self) -> &ResourceClient<Booking> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => BookingStoreError::NotFound(id),
            FrameworkError::Conflict(key) => BookingStoreError::DuplicateOrderNo(key),
            other => match downcast_entity_error::<BookingStoreError>(other) {
                Ok(store) => store,
                Err(other) => BookingStoreError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}
