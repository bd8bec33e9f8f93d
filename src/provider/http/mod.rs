// ABOUTME: HTTP transport for the provider API.
// ABOUTME: Exposes the reqwest-backed ApiClient.

mod client;

pub use client::ApiClient;
