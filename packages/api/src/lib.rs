//! # API crate: REST client for the admin backend
//!
//! The console talks to one backend exposing a resource per entity type under
//! `<base_url>/api/<resource>`:
//!
//! | Request | Body | Response |
//! |---------|------|----------|
//! | `GET /api/<resource>` | none | JSON array of entities |
//! | `POST /api/<resource>` | draft (no id) | created entity with server-assigned id |
//! | `PUT /api/<resource>/{id}` | draft | updated entity (body optional) |
//! | `DELETE /api/<resource>/{id}` | none | ignored |
//!
//! [`RestRemote`] implements [`store::Remote`] over those endpoints with
//! `reqwest`, which uses the browser `fetch` API on wasm and hyper natively.
//! [`ApiClient`] holds the shared `reqwest::Client` and base URL and hands out
//! typed remotes. Every failure is an [`ApiError`], converted into
//! [`store::ResourceError::Network`] at the trait boundary.

mod client;
mod error;

pub use client::{ApiClient, RestRemote};
pub use error::ApiError;
