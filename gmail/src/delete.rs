//! # Delete message
//!
//! Module dedicated to the message deletion capability.

use async_trait::async_trait;
use batch::AnyResult;

use crate::Client;

/// Capability to delete a message by its identifier.
///
/// The capability is expected to be already authenticated. Consumers
/// should depend on this trait rather than on [`Client`] directly, so
/// the capability can be injected at construction.
#[async_trait]
pub trait DeleteMessage: Send + Sync {
    /// Permanently delete the message matching the given id.
    ///
    /// This operation is definitive: the message does not transit
    /// via the Trash folder.
    async fn delete_message(&self, id: &str) -> AnyResult<()>;
}

#[async_trait]
impl DeleteMessage for Client {
    async fn delete_message(&self, id: &str) -> AnyResult<()> {
        Ok(self.delete_message(id).await?)
    }
}
