//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on request translation and auth plumbing.
//! Every mutating query in here filters by both record id and owner id.

pub mod auth;
pub mod favicon;
pub mod password;
pub mod profile;
pub mod session;
pub mod storage;
pub mod widget;
