//! HTTP access to the release host.

mod client;

pub use client::HttpClient;
