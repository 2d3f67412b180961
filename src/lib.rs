//! Hearth - a small one-request-per-connection HTTP/1.1 server
//!
//! Core library for parsing, routing and response serialization.

pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod server;
pub mod static_files;
