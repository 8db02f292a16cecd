//! Renderers for discovered libraries.
//!
//! - [`terminal`] — colored table for `list`, or plain aligned columns with `--quiet`.
//! - [`export`] — attribution documents in text, JSON or XML.

pub mod export;
pub mod terminal;
