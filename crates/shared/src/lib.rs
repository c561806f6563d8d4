//! Wire types exchanged between the board client and a move authority.

pub mod protocol;

pub use protocol::*;
