//! Collaborator ports for the state the flow reads and mutates, with
//! in-memory mock implementations for tests and local wiring.

pub mod auth_note;
pub mod event;
pub mod user;

pub use auth_note::{AuthNoteStore, MockAuthNoteStore};
pub use event::{EventSink, MockEventSink, NoOpEventSink};
pub use user::{MockUserRepository, UserRepository};
