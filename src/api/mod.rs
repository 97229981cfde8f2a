//! Client side of the `/foods` REST resource.
//!
//! [`FoodsApi`] is the seam the dashboard talks to; [`HttpFoodsApi`] is the
//! reqwest-backed implementation used by the CLI.

mod client;
mod error;

pub use client::{FoodsApi, HttpFoodsApi};
pub use error::ApiError;
