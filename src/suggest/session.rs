use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::Suggestion;
use crate::suggest::source::SuggestionSource;

/// Lifecycle phase of a suggestion-backed input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Drives one input field against a suggestion source
///
/// Every edit issues a lookup tagged with a monotonically increasing
/// ticket. Only the holder of the newest ticket may publish its results,
/// so a slow response from an earlier keystroke can never overwrite a
/// newer one. In-flight lookups are not cancelled; a superseded response
/// is simply discarded when it lands.
pub struct SuggestSession {
    source: Arc<dyn SuggestionSource>,
    seq: AtomicU64,
    inner: Mutex<Inner>,
}

struct Inner {
    phase: SuggestPhase,
    suggestions: Vec<Suggestion>,
}

impl SuggestSession {
    pub fn new(source: Arc<dyn SuggestionSource>) -> Self {
        Self {
            source,
            seq: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                phase: SuggestPhase::Idle,
                suggestions: Vec::new(),
            }),
        }
    }

    /// Handle an edit to the input field, returning the visible list
    ///
    /// Blank input clears the field back to idle without a lookup; the
    /// ticket bump alone invalidates whatever is still in flight. Source
    /// failures resolve to an empty list and are only visible in logs.
    pub async fn input(&self, text: &str) -> Vec<Suggestion> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if text.trim().is_empty() {
            let mut inner = self.inner.lock().await;
            // A newer edit may have won the lock first; leave its state alone
            if self.seq.load(Ordering::SeqCst) != ticket {
                return inner.suggestions.clone();
            }
            inner.phase = SuggestPhase::Idle;
            inner.suggestions.clear();
            return Vec::new();
        }

        {
            let mut inner = self.inner.lock().await;
            if self.seq.load(Ordering::SeqCst) != ticket {
                return inner.suggestions.clone();
            }
            inner.phase = SuggestPhase::Loading;
        }

        // The lock is never held across this await
        let result = self.source.suggest(text).await;

        let mut inner = self.inner.lock().await;
        if self.seq.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Discarding superseded suggestion lookup for {:?}", text);
            return inner.suggestions.clone();
        }

        match result {
            Ok(suggestions) => {
                inner.phase = SuggestPhase::Loaded;
                inner.suggestions = suggestions.clone();
                suggestions
            }
            Err(err) => {
                tracing::warn!(
                    "Suggestion source '{}' failed: {}",
                    self.source.name(),
                    err
                );
                inner.phase = SuggestPhase::Failed;
                inner.suggestions.clear();
                Vec::new()
            }
        }
    }

    /// Current lifecycle phase
    pub async fn phase(&self) -> SuggestPhase {
        self.inner.lock().await.phase
    }

    /// Suggestions currently visible to the field
    pub async fn current(&self) -> Vec<Suggestion> {
        self.inner.lock().await.suggestions.clone()
    }
}
