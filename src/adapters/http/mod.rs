//! HTTP surface built on axum.

pub mod billing;
