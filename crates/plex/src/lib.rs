//! Plex Media Server API client for library listing and poster upload.
//!
//! Provides an async client for the small slice of the Plex HTTP API
//! needed to enumerate library sections and their items, and to upload
//! poster artwork for a single item.

pub mod client;
pub mod types;

pub use client::{Client, Error};
pub use types::{Metadata, Section};
