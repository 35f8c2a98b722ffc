//! Shared wire types for the activity board
//!
//! Defines the JSON bodies exchanged with the activities API, the derived
//! values shown on each card, and the endpoint paths.

pub mod activity;
pub mod messages;
pub mod routes;

pub use activity::*;
pub use messages::*;
