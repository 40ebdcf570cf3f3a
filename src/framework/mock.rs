//! # Mock Framework
//!
//! Utilities for testing clients and the booking saga in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.
//! For scripted replies without driving the receiver by hand, use [`MockClient`].

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation makes the background task panic, which surfaces in the test as
/// `FrameworkError::ActorDropped` on the caller side and a failed [`MockClient::verify`].
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<SeatArea>::new();
/// mock.expect_action().return_ok(LedgerActionResult::Reserve(ReserveOutcome::Reserved));
///
/// let ledger = LedgerClient::new(mock.client());
/// // Use the client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Get { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Create { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Update { response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Action { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that records the scripted reply for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> Self {
        Self { expectations, wrap }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.expectations.lock().unwrap().push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends messages to a channel the test controls. The test inspects
/// each request and answers it, or drops the responder to simulate a lost reply.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, update, respond_to }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}
