//! Core library for esamcp
//!
//! This crate implements the **Functional Core** of the esamcp application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The esamcp project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`esamcp_core`** (this crate): Pure transformation functions with zero I/O
//! - **`esamcp`**: HTTP calls to esa, the MCP server and orchestration (the Imperative Shell)
//!
//! Every function here is deterministic and can be tested with fixture data,
//! no mocking required.
//!
//! # Module Organization
//!
//! - [`normalize`]: Team names, post name/category splitting and search query rewriting
//! - [`post`], [`comment`], [`category`], [`team`]: esa API entities and their
//!   compact agent-facing projections
//! - [`search`]: The zero-result OR suggestion heuristic
//! - [`attachment`]: Attachment path normalization and content classification
//! - [`prompt`]: Summary prompt text and its translations
//! - [`response`]: Tool, resource and prompt envelopes and their error formatters
//! - [`error`]: [`error::OperationError`], the single failure type behind every envelope
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use esamcp_core::post::{transform_post_list, PostList, TransformOptions};
//! use esamcp_core::response::format_tool_response;
//!
//! let list: PostList = serde_json::from_str(body)?;
//! let envelope = format_tool_response(&transform_post_list(list, TransformOptions::truncate(500)));
//! ```

pub mod attachment;
pub mod category;
pub mod comment;
pub mod error;
pub mod normalize;
pub mod post;
pub mod prompt;
pub mod response;
pub mod search;
pub mod team;
