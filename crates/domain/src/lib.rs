//! Domain layer for the circle bridge.
//!
//! This crate contains:
//! - Wire models for the location-sharing API (Circle, Member, MemberLocation)
//! - The per-cycle position report projection
//! - The Cursor-on-Target event model and XML serialization
//! - The `CircleSource` trait the poller is written against

pub mod models;
pub mod services;
