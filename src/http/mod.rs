//! HTTP protocol implementation.
//!
//! This module implements a one-shot HTTP/1.1 exchange: each connection
//! carries exactly one request and one response, then closes.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine driving the exchange
//! - **`parser`**: Parses a raw request buffer into a [`request::Request`]
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`handler`**: The handler function type routes are bound to
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!   Idle → Reading → Parsing → Resolving → Invoking → Serializing → Writing → Closed
//!              │         │                     │            │           │
//!              └─────────┴──────── error ──────┴────────────┴───────────┴──→ Failed
//! ```
//!
//! A read that returns no bytes goes straight to `Closed`. The stream is shut
//! down on every exit path.
//!
//! # Example
//!
//! ```ignore
//! use hearth::http::connection::Connection;
//! use hearth::routing::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router: Router = build_router();
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, peer, router).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod handler;
pub mod writer;
pub mod mime;
