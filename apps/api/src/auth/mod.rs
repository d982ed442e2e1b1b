//! Session management: username/password login issuing opaque bearer tokens.
//! A trust boundary in front of the analysis core, nothing more.

pub mod handlers;
pub mod tokens;
pub mod users;
