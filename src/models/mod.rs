//! Core data models for the asset tracking service.
//!
//! `Asset` is both the persisted record and the HTTP response body; the
//! request payloads keep every field optional so validation happens in the
//! service rather than in the JSON extractor.

pub mod asset;
