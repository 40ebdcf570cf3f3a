//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: default `get` and `list` built
//! on top of a generic `ResourceClient`, plus the error recovery every domain
//! client needs.
use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read operations.
///
/// Implementors only supply [`inner`](ActorClient::inner) and
/// [`map_error`](ActorClient::map_error).
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `query`, in no particular order.
    #[tracing::instrument(skip(self))]
    async fn list(&self, query: T::Query) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(query).await.map_err(Self::map_error)
    }
}

/// Recovers the entity's own error type from [`FrameworkError::EntityError`].
///
/// Anything else, including an entity error of a different type, is handed back.
pub fn downcast_entity_error<E>(e: FrameworkError) -> Result<E, FrameworkError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match e {
        FrameworkError::EntityError(inner) => inner
            .downcast::<E>()
            .map(|typed| *typed)
            .map_err(FrameworkError::EntityError),
        other => Err(other),
    }
}
