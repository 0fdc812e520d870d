//! # Response
//!
//! Module dedicated to tool responses. Every tool outcome, success or
//! failure, is rendered as a textual response: no error crosses the
//! tool boundary.

use std::fmt;

use serde::Serialize;

/// The tool response struct.
///
/// A response is a list of content blocks, textual only in this
/// server.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Response {
    /// The content blocks of the response.
    pub content: Vec<Content>,
}

/// A tool response content block.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

impl Response {
    /// Creates a textual response.
    pub fn text(text: impl ToString) -> Self {
        Self {
            content: vec![Content::Text {
                text: text.to_string(),
            }],
        }
    }

    /// Creates a textual response from an error.
    pub fn error(err: impl fmt::Display) -> Self {
        Self::text(format!("Error: {err}"))
    }

    /// Creates a textual response for an unknown tool name.
    pub fn unknown_tool(name: &str) -> Self {
        Self::text(format!("Unknown tool: {name}"))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, Content::Text { text }) in self.content.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{text}")?;
        }
        Ok(())
    }
}
