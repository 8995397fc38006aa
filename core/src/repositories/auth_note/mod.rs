//! Authentication-attempt note store module.

mod r#trait;
pub use r#trait::AuthNoteStore;

mod mock;
pub use mock::MockAuthNoteStore;

#[cfg(test)]
mod tests;
