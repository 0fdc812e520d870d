//! # Server
//!
//! Module dedicated to the stdio transport. The [`Server`] reads one
//! JSON-RPC request per line on the standard input, dispatches
//! tool-listing and tool-invocation requests, and writes one response
//! per line on the standard output.

pub mod rpc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, trace};

use crate::{handler::Handler, tool, Error, Result};

/// The name advertised by the server in response to an
/// initialization request.
pub const SERVER_NAME: &str = "gmail-delete-only";

/// The MCP protocol version the server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// The stdio tool server.
pub struct Server {
    /// The handler tool calls are dispatched to.
    handler: Handler,
}

impl Server {
    /// Creates a new server from the given handler.
    pub fn new(handler: Handler) -> Self {
        Self { handler }
    }

    /// Runs the server loop until the standard input closes.
    ///
    /// Transport-level failures (broken stdio, unserializable
    /// responses) are the only errors this function returns: tool
    /// outcomes, whatever they are, flow back as responses.
    pub async fn listen(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        debug!("listening on standard input");

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(Error::ReadRequestError)?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(res) = self.process_line(line).await? {
                write(&mut stdout, res).await?;
            }
        }

        debug!("standard input closed, stopping");

        Ok(())
    }

    /// Processes one request line.
    ///
    /// Returns no response for notifications, an error envelope for
    /// lines that are not valid JSON-RPC requests, and the handled
    /// response otherwise.
    async fn process_line(&self, line: &str) -> Result<Option<rpc::Response>> {
        let req: rpc::Request = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(err) => {
                debug!("cannot parse request: {err}");
                let res = rpc::Response::error(Value::Null, rpc::PARSE_ERROR, err);
                return Ok(Some(res));
            }
        };

        // notifications expect no response
        let Some(id) = req.id else {
            trace!("ignoring notification {}", req.method);
            return Ok(None);
        };

        Ok(Some(self.respond(id, &req.method, req.params).await?))
    }

    async fn respond(&self, id: Value, method: &str, params: Value) -> Result<rpc::Response> {
        debug!("handling request {method}");

        let res = match method {
            "initialize" => rpc::Response::ok(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            ),
            "ping" => rpc::Response::ok(id, json!({})),
            "tools/list" => rpc::Response::ok(id, json!({ "tools": tool::list() })),
            "tools/call" => match serde_json::from_value::<rpc::CallToolParams>(params) {
                Ok(params) => {
                    let res = self.handler.handle(&params.name, params.arguments).await;
                    let res = serde_json::to_value(res).map_err(Error::SerializeResponseError)?;
                    rpc::Response::ok(id, res)
                }
                Err(err) => rpc::Response::error(id, rpc::INVALID_PARAMS, err),
            },
            method => rpc::Response::error(
                id,
                rpc::METHOD_NOT_FOUND,
                format!("method not found: {method}"),
            ),
        };

        Ok(res)
    }
}

async fn write<W>(stdout: &mut W, res: rpc::Response) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(&res).map_err(Error::SerializeResponseError)?;
    json.push('\n');

    stdout
        .write_all(json.as_bytes())
        .await
        .map_err(Error::WriteResponseError)?;
    stdout.flush().await.map_err(Error::WriteResponseError)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use batch::AnyResult;
    use gmail::DeleteMessage;
    use serde_json::{json, Value};
    use tokio::test;

    use super::{rpc, write, Server, PROTOCOL_VERSION, SERVER_NAME};
    use crate::handler::Handler;

    struct DummyDeleter;

    #[async_trait]
    impl DeleteMessage for DummyDeleter {
        async fn delete_message(&self, _id: &str) -> AnyResult<()> {
            Ok(())
        }
    }

    fn server() -> Server {
        Server::new(Handler::new(Arc::new(DummyDeleter)))
    }

    #[test_log::test(test)]
    async fn test_initialize() {
        let line = json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": "initialize",
            "params": {},
        })
        .to_string();

        let res = server().process_line(&line).await.unwrap().unwrap();

        assert_eq!(res.id, json!(0));
        assert!(res.error.is_none());

        let result = res.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[test_log::test(test)]
    async fn test_tools_list() {
        let line = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
        })
        .to_string();

        let res = server().process_line(&line).await.unwrap().unwrap();

        let result = res.result.unwrap();
        let tools = result["tools"].as_array().unwrap();

        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "delete_email");
        assert_eq!(tools[1]["name"], "batch_delete_emails");
    }

    #[test_log::test(test)]
    async fn test_tools_call() {
        let line = json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {
                "name": "delete_email",
                "arguments": { "messageId": "m1" },
            },
        })
        .to_string();

        let res = server().process_line(&line).await.unwrap().unwrap();

        assert_eq!(res.id, json!(2));
        assert!(res.error.is_none());

        let result = res.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "Deleted message m1");
    }

    #[test_log::test(test)]
    async fn test_tools_call_with_invalid_params() {
        let line = json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "arguments": {} },
        })
        .to_string();

        let res = server().process_line(&line).await.unwrap().unwrap();

        assert!(res.result.is_none());
        assert_eq!(res.error.unwrap().code, rpc::INVALID_PARAMS);
    }

    #[test_log::test(test)]
    async fn test_notification_gets_no_response() {
        let line = json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
        })
        .to_string();

        let res = server().process_line(&line).await.unwrap();

        assert!(res.is_none());
    }

    #[test_log::test(test)]
    async fn test_invalid_json_line() {
        let res = server().process_line("not json").await.unwrap().unwrap();

        assert_eq!(res.id, Value::Null);
        assert_eq!(res.error.unwrap().code, rpc::PARSE_ERROR);
    }

    #[test_log::test(test)]
    async fn test_unknown_method() {
        let line = json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "resources/list",
        })
        .to_string();

        let res = server().process_line(&line).await.unwrap().unwrap();

        assert!(res.result.is_none());
        assert_eq!(res.error.unwrap().code, rpc::METHOD_NOT_FOUND);
    }

    #[test_log::test(test)]
    async fn test_write_produces_one_line_per_response() {
        let mut out = Vec::new();

        write(&mut out, rpc::Response::ok(json!(5), json!({}))).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);

        let envelope: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(envelope["jsonrpc"], "2.0");
        assert_eq!(envelope["id"], 5);
    }
}
