//! Backend-proxy clients.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page builder talks to two HTTP backends: a metadata proxy used to
//! import an artist's profile and releases, and a theme backend that asks
//! an LLM for a site theme. Both share the plumbing in [`http`].

pub mod http;
pub mod metadata;
pub mod theme;
