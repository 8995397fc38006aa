//! Verification event sink module.

mod r#trait;
pub use r#trait::EventSink;

mod noop;
pub use noop::NoOpEventSink;

mod mock;
pub use mock::MockEventSink;
