#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

pub mod error;
pub mod handler;
pub mod response;
pub mod server;
pub mod tool;

#[doc(inline)]
pub use crate::error::{Error, Result};
