//! HTTP request layer: decodes query requests, hands them to the search use
//! case and encodes the ranked matches.
//!
//! Endpoints:
//! - GET  /health - liveness check, plain `OK`
//! - POST /query  - top-K search, `{embedding, topk?, mode?}`
//! - GET  /stats  - store size and load counters

pub mod error;
pub mod server;
