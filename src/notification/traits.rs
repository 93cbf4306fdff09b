use async_trait::async_trait;

use crate::error::SignalError;
use super::Notification;

/// The `Notifier` trait is the outbound transport for signal-change notifications.
/// Delivery is best-effort; callers never see the result on the ingestion path.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Transport name for logs
    fn name(&self) -> &'static str;

    /// Deliver one notification
    async fn notify(&self, notification: &Notification) -> Result<(), SignalError>;
}
