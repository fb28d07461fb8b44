//! Data models for the catalog collections and API payloads

pub mod ack;
pub mod book;
pub mod document;
pub mod session;

pub use ack::{DeleteAck, InsertAck, UpdateAck};
pub use book::BookFields;
pub use session::SessionClaims;
