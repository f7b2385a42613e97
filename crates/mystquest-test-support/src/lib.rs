//! Shared test mocks and utilities for the MystQuest game platform.

mod catalog;
mod clock;
mod notifier;
mod session_store;
mod token;

pub use catalog::InMemoryCatalog;
pub use clock::FixedClock;
pub use notifier::RecordingNotifier;
pub use session_store::InMemorySessionStore;
pub use token::SequenceTokenIssuer;
