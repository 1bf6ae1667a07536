//! Shared utilities for the pool-staking contract suite.
//!
//! This crate provides:
//! - [`roles`]: the capability registry (`Admin`, `Upgrader`) every
//!   ledger contract checks before an administrative mutation.
//! - Storage TTL constants so every contract extends entries uniformly.

#![no_std]

pub mod roles;

pub use roles::Role;

/// Remaining-ledger threshold below which a persistent entry is extended.
pub const TTL_THRESHOLD: u32 = 5184000;
/// Number of ledgers a persistent entry is extended to.
pub const TTL_EXTEND_TO: u32 = 10368000;
