//! Test-only library interface for the valentine box.
//!
//! Re-exports the pure core - debouncer, interaction state machine, render
//! engine and sleep-gate helpers - so it can be tested on the host (no
//! embedded hardware required).
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod debounce;
pub mod power_logic;
pub mod render;
pub mod session;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
