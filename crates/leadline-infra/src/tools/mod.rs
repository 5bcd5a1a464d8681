//! Context tool implementations.
//!
//! HTTP adapters behind the
//! [`ContextTools`](leadline_core::tools::ContextTools) port: a website
//! reader and a web search, both delegating to configured external
//! endpoints.

pub mod http;

pub use http::HttpContextTools;
