//! Page-builder backend clients and configuration.
//!
//! The block-tree editor core lives in the `blocktree` crate; this crate
//! holds everything that talks to the network.

pub mod config;
pub mod services;
