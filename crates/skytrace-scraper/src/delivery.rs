//! Single-shot result delivery.
//!
//! A top-level scrape runs on its own task and hands back exactly one
//! `Result` through a oneshot channel. The sender is consumed by the send and
//! the receiver by [`Delivery::recv`], so neither side can use it twice.

use crate::error::{Result, ScrapeError};
use std::future::Future;
use tokio::sync::oneshot;

/// Receiving end of a running scrape.
#[derive(Debug)]
pub struct Delivery<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T: Send + 'static> Delivery<T> {
    /// Run `producer` on a new task and deliver its result.
    pub fn spawn<F>(producer: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();

        tokio::spawn(async move {
            let result = producer.await;
            if sender.send(result).is_err() {
                tracing::debug!("Delivery receiver dropped before the result arrived");
            }
        });

        Self { receiver }
    }

    /// Wait for the result.
    ///
    /// # Errors
    /// Returns the producer's error, or [`ScrapeError::DeliveryDropped`] if the
    /// producer task ended without sending (for example because it panicked).
    pub async fn recv(self) -> Result<T> {
        match self.receiver.await {
            Ok(result) => result,
            Err(_) => Err(ScrapeError::DeliveryDropped),
        }
    }
}
