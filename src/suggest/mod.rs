// Suggestion subsystem exports
pub mod session;
pub mod source;

pub use session::{SuggestPhase, SuggestSession};
pub use source::{GeocodeSource, LocalSource, SuggestError, SuggestionSource};
