//! # Handler
//!
//! Module dedicated to tool call handling. The handler validates tool
//! arguments, executes the matching operation and renders the outcome
//! as a textual [`Response`], whatever happens.

use std::{num::NonZeroUsize, sync::Arc};

use futures::future::join_all;
use gmail::DeleteMessage;
use serde_json::Value;
use tracing::debug;

use crate::{response::Response, tool};

/// The tool call handler.
///
/// Holds the deletion capability tool calls are dispatched to. The
/// capability is injected at construction, so the handler can be
/// driven against any [`DeleteMessage`] implementation.
#[derive(Clone)]
pub struct Handler {
    /// The injected deletion capability.
    deleter: Arc<dyn DeleteMessage>,
}

impl Handler {
    /// Creates a new handler from the given deletion capability.
    pub fn new(deleter: Arc<dyn DeleteMessage>) -> Self {
        Self { deleter }
    }

    /// Handles the given tool call.
    ///
    /// This function never fails: validation errors, execution
    /// errors and unknown tool names are all rendered as textual
    /// responses.
    pub async fn handle(&self, name: &str, args: Value) -> Response {
        match name {
            tool::DELETE_EMAIL => self.delete_email(args).await,
            tool::BATCH_DELETE_EMAILS => self.batch_delete_emails(args).await,
            name => Response::unknown_tool(name),
        }
    }

    async fn delete_email(&self, args: Value) -> Response {
        let args: tool::DeleteEmailArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(err) => return Response::error(err),
        };

        if args.message_id.is_empty() {
            return Response::error("messageId cannot be empty");
        }

        match self.deleter.delete_message(&args.message_id).await {
            Ok(()) => Response::text(format!("Deleted message {}", args.message_id)),
            Err(err) => Response::error(err),
        }
    }

    async fn batch_delete_emails(&self, args: Value) -> Response {
        let args: tool::BatchDeleteEmailsArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(err) => return Response::error(err),
        };

        let Some(size) = NonZeroUsize::new(args.batch_size) else {
            return Response::error("batchSize must be a positive integer");
        };

        debug!(
            "deleting {} messages in batches of {size}",
            args.message_ids.len()
        );

        let deleter = self.deleter.clone();
        let report = batch::process(args.message_ids, size, move |ids| {
            let deleter = deleter.clone();
            async move {
                // all deletions of the batch are issued together and
                // awaited jointly: one failure fails the whole batch,
                // but only once every deletion has resolved
                let outcomes = join_all(ids.iter().map(|id| deleter.delete_message(id))).await;
                outcomes.into_iter().collect::<batch::AnyResult<()>>()?;
                Ok(ids)
            }
        })
        .await;

        let mut text = format!(
            "Batch delete complete. Successes: {}. Failures: {}.",
            report.successes.len(),
            report.failures.len(),
        );

        if !report.failures.is_empty() {
            text.push_str("\nFailed IDs:");
            for (id, err) in &report.failures {
                text.push_str(&format!("\n- {id} ({err})"));
            }
        }

        Response::text(text)
    }
}
