//! # Tools
//!
//! Module dedicated to the deletion tools: their names, their
//! metadata advertised to clients and their typed arguments.
//!
//! Arguments reach the server as loosely-typed JSON payloads:
//! deserializing them into the structures of this module is the one
//! validation step executed at the dispatcher boundary.

use serde::Deserialize;
use serde_json::{json, Value};

/// The name of the single deletion tool.
pub const DELETE_EMAIL: &str = "delete_email";

/// The name of the batch deletion tool.
pub const BATCH_DELETE_EMAILS: &str = "batch_delete_emails";

/// The default amount of messages processed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Arguments of the [`DELETE_EMAIL`] tool.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEmailArgs {
    /// The id of the message to delete.
    pub message_id: String,
}

/// Arguments of the [`BATCH_DELETE_EMAILS`] tool.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteEmailsArgs {
    /// The ids of the messages to delete.
    pub message_ids: Vec<String>,

    /// The amount of messages to process per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

/// Returns the metadata of all the tools exposed by the server, as
/// advertised in response to a tool-listing request.
pub fn list() -> Value {
    json!([
        {
            "name": DELETE_EMAIL,
            "description": "Permanently delete a single Gmail message by messageId",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "messageId": {
                        "type": "string",
                        "description": "ID of the email message to delete"
                    }
                },
                "required": ["messageId"]
            }
        },
        {
            "name": BATCH_DELETE_EMAILS,
            "description": "Permanently delete multiple Gmail messages by messageIds in batches",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "messageIds": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of message IDs to delete"
                    },
                    "batchSize": {
                        "type": "number",
                        "description": "Number of messages to process in each batch (default: 50)"
                    }
                },
                "required": ["messageIds"]
            }
        }
    ])
}
