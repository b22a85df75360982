//! Order dispatch: channel renderings and the send-with-fallback pipeline.
//!
//! A finalized order is rendered twice - as a structured [`OrderPayload`]
//! for programmatic submission and as a human-readable message for the
//! messaging and mail channels - then pushed through the channels in a
//! fixed sequence that degrades gracefully when the remote endpoint is
//! absent or down.

pub mod links;
pub mod message;
mod payload;

pub use payload::{CustomerPayload, DeliveryPayload, ItemPayload, OrderPayload};

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, warn};

use crate::checkout::Order;

/// Failure submitting the order to the remote endpoint.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Transport failure reaching the endpoint.
    #[error("submission transport failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("submission endpoint returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
}

/// Fire-and-forget opener for outbound deep links (messaging, mail
/// composition).
///
/// A launch failure is not observable to the pipeline and never blocks the
/// remaining dispatch steps.
pub trait LinkLauncher {
    /// Open `url` in whatever surface the host environment provides.
    fn launch(&self, url: &str);
}

/// Remote order submission channel.
pub trait RemoteSubmitter {
    /// POST the structured payload; success is any 2xx-equivalent
    /// response.
    async fn submit(&self, payload: &OrderPayload) -> Result<(), SubmitError>;
}

/// Remote submitter POSTing the payload as JSON to a configured endpoint.
#[derive(Clone)]
pub struct HttpRemoteSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemoteSubmitter {
    /// Create a submitter for `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl RemoteSubmitter for HttpRemoteSubmitter {
    async fn submit(&self, payload: &OrderPayload) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// How an order dispatch resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchReport {
    /// Messaging link opened and the remote submission succeeded.
    Dispatched,
    /// Remote submission failed and the mail fallback was opened. A
    /// degraded success - the messaging channel already carried the order.
    RemoteSubmissionFailed,
    /// No remote endpoint is configured; the mail fallback was opened.
    /// Informational, not an error.
    NoRemoteConfigured,
}

/// Dispatch refusals. Distinct from a degraded [`DispatchReport`]: on an
/// error nothing was sent through any channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A dispatch on this pipeline has not settled yet.
    #[error("an order dispatch is already in flight")]
    InFlight,
}

/// Multi-channel dispatch pipeline with mail fallback.
pub struct DispatchPipeline<S, L> {
    seller_phone: String,
    currency: String,
    remote: Option<S>,
    launcher: L,
    in_flight: AtomicBool,
}

impl<S: RemoteSubmitter, L: LinkLauncher> DispatchPipeline<S, L> {
    /// Build a pipeline. `remote` is `None` when no submission endpoint is
    /// configured; the mail fallback then always fires.
    #[must_use]
    pub fn new(
        seller_phone: impl Into<String>,
        currency: impl Into<String>,
        remote: Option<S>,
        launcher: L,
    ) -> Self {
        Self {
            seller_phone: seller_phone.into(),
            currency: currency.into(),
            remote,
            launcher,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Dispatch `order` through the outbound channels, in order:
    ///
    /// 1. Always open the messaging deep link with the rendered message.
    /// 2. With a remote endpoint configured, POST the structured payload;
    ///    on any failure open the mail fallback and report
    ///    [`DispatchReport::RemoteSubmissionFailed`].
    /// 3. Without one, open the mail fallback and report
    ///    [`DispatchReport::NoRemoteConfigured`].
    ///
    /// The caller clears the cart after this returns, whatever the report
    /// says: a degraded dispatch already reached the messaging channel.
    /// Clearing even on degraded success is a deliberate choice carried
    /// over from the storefront's long-standing behavior (see DESIGN.md).
    ///
    /// # Errors
    ///
    /// [`DispatchError::InFlight`] when another dispatch on this pipeline
    /// has not settled; no channel is touched in that case.
    pub async fn dispatch(&self, order: &Order) -> Result<DispatchReport, DispatchError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(DispatchError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let text = message::render_message(order, &self.currency);
        self.launcher
            .launch(&links::messaging_link(&self.seller_phone, &text));

        let Some(remote) = self.remote.as_ref() else {
            debug!("No remote submission endpoint configured, using mail fallback");
            self.launch_mail_fallback(order);
            return Ok(DispatchReport::NoRemoteConfigured);
        };

        match remote.submit(&OrderPayload::from(order)).await {
            Ok(()) => Ok(DispatchReport::Dispatched),
            Err(e) => {
                warn!(error = %e, "Remote order submission failed, using mail fallback");
                self.launch_mail_fallback(order);
                Ok(DispatchReport::RemoteSubmissionFailed)
            }
        }
    }

    fn launch_mail_fallback(&self, order: &Order) {
        let subject = format!("New Order from {}", order.customer_name);
        let body = message::plain_message(order, &self.currency);
        self.launcher.launch(&links::mailto_link(&subject, &body));
    }
}

/// Clears the in-flight flag on every dispatch exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
