//! Networking - talking to the move authority
//!
//! - [`client::RemoteAuthority`] - The legality gate every move passes through
//! - [`client::HttpAuthority`] - JSON-over-HTTP implementation (reqwest)

pub mod client;

pub use client::{
    AuthorityError, AuthorityResult, GameStart, HttpAuthority, MoveSubmission, MoveVerdict,
    RemoteAuthority,
};
