//! Client-side chat connection management library.
//!
//! Tsunagi core models the bookkeeping around a customer-support chat
//! session: connection records and their lifecycle state machine, the
//! active-connection pointer, broadcast of changes to interested observers,
//! and the room handshake against a remote chat service.

// layers
pub mod domain;
pub mod infrastructure;
pub mod usecase;
