//! Integration tests for sink-sim.
//!
//! These tests verify the interaction between components:
//! - Period loop ordering against mock participants
//! - Sink facilities driven end to end from TOML configuration

pub mod common;
