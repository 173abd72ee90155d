//! Hostel application shell
//!
//! Session handling, role login, and the view adapters a UI binds to.
//! All booking decisions go through the allocation engine in
//! `hostel-core`; nothing here mutates entities directly.

pub mod auth;
pub mod state;
pub mod view;
