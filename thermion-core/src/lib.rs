//! Board-agnostic state mirroring logic for the panel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Value cache over the fixed key set shared with the gateway
//! - Synchronizer applying inbound state messages to the cache
//! - Single-slot outbound channel for panel commands
//! - Gateway link health monitoring

#![no_std]
#![deny(unsafe_code)]

pub mod cache;
pub mod link;
pub mod outbox;
pub mod sync;
