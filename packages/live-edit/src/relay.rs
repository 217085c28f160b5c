//! Live-edit relay for one rendered page

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use pagecraft_model::{EditProperty, ElementEdit};
use serde::Serialize;
use tracing::{debug, warn};

use crate::apply::apply_property;
use crate::channel::{EditChannel, SubscriptionHandle};
use crate::error::{ApplyError, LiveEditError};
use crate::resolve::ResolutionChain;
use crate::surface::Surface;

pub const DEFAULT_JOURNAL_LIMIT: usize = 100;

/// What happened to a single edit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EditOutcome {
    Applied { strategy: &'static str },
    ResolutionFailed { reason: String },
    ApplyFailed { reason: String },
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub edit_id: String,
    pub property: String,
    pub outcome: EditOutcome,
    pub at: DateTime<Utc>,
}

struct Inner {
    page_key: String,
    surface: Mutex<Surface>,
    chain: ResolutionChain,
    journal: Mutex<VecDeque<JournalEntry>>,
    journal_limit: usize,
}

/// Applies element edits to the rendered surface of one page.
///
/// Cloning is cheap and clones share the same surface, so a clone can be
/// moved into a subscription callback. Every failure is contained to the
/// edit that caused it.
#[derive(Clone)]
pub struct LiveEditRelay {
    inner: Arc<Inner>,
}

impl LiveEditRelay {
    pub fn new(page_key: impl Into<String>, surface: Surface, chain: ResolutionChain) -> Self {
        Self::with_journal_limit(page_key, surface, chain, DEFAULT_JOURNAL_LIMIT)
    }

    pub fn with_journal_limit(
        page_key: impl Into<String>,
        surface: Surface,
        chain: ResolutionChain,
        journal_limit: usize,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                page_key: page_key.into(),
                surface: Mutex::new(surface),
                chain,
                journal: Mutex::new(VecDeque::new()),
                journal_limit: journal_limit.max(1),
            }),
        }
    }

    pub fn page_key(&self) -> &str {
        &self.inner.page_key
    }

    /// Resolve and apply one edit. Failures are logged and journaled,
    /// never propagated.
    pub fn apply(&self, edit: &ElementEdit) -> EditOutcome {
        let outcome = match self.try_apply(edit) {
            Ok(strategy) => {
                debug!(
                    page_key = %self.inner.page_key,
                    edit_id = %edit.id,
                    property = %edit.property,
                    strategy,
                    "Applied live edit"
                );
                EditOutcome::Applied { strategy }
            }
            Err(LiveEditError::Resolution(err)) => {
                warn!(page_key = %self.inner.page_key, edit_id = %edit.id, error = %err, "Live edit target not found");
                EditOutcome::ResolutionFailed { reason: err.to_string() }
            }
            Err(LiveEditError::Apply(err)) => {
                warn!(
                    page_key = %self.inner.page_key,
                    edit_id = %edit.id,
                    property = %edit.property,
                    error = %err,
                    "Live edit not applied"
                );
                EditOutcome::ApplyFailed { reason: err.to_string() }
            }
        };

        self.record(edit, outcome.clone());
        outcome
    }

    fn try_apply(&self, edit: &ElementEdit) -> Result<&'static str, LiveEditError> {
        let mut surface = self.surface();
        let (path, strategy) = self.inner.chain.resolve(&surface, edit)?;

        let property =
            EditProperty::parse(&edit.property).ok_or_else(|| ApplyError::UnknownProperty(edit.property.clone()))?;
        if let Some(element) = surface.element_mut(&path) {
            apply_property(element, &property, &edit.value)?;
        }
        Ok(strategy)
    }

    fn record(&self, edit: &ElementEdit, outcome: EditOutcome) {
        let mut journal = self.inner.journal.lock().unwrap_or_else(PoisonError::into_inner);
        if journal.len() >= self.inner.journal_limit {
            journal.pop_front();
        }
        journal.push_back(JournalEntry {
            edit_id: edit.id.clone(),
            property: edit.property.clone(),
            outcome,
            at: Utc::now(),
        });
    }

    fn surface(&self) -> MutexGuard<'_, Surface> {
        self.inner.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current surface
    pub fn snapshot(&self) -> Surface {
        self.surface().clone()
    }

    /// Swap in a freshly rendered surface, e.g. after a publish
    pub fn replace_surface(&self, surface: Surface) {
        *self.surface() = surface;
    }

    /// Journal entries, oldest first
    pub fn journal(&self) -> Vec<JournalEntry> {
        let journal = self.inner.journal.lock().unwrap_or_else(PoisonError::into_inner);
        journal.iter().cloned().collect()
    }

    /// Subscribe to this page's edits on `channel`. Dropping or cancelling
    /// the handle detaches the relay.
    pub fn attach(&self, channel: &dyn EditChannel) -> SubscriptionHandle {
        let relay = self.clone();
        channel.subscribe(
            &self.inner.page_key,
            Box::new(move |edit: ElementEdit| {
                relay.apply(&edit);
            }),
        )
    }
}

impl std::fmt::Debug for LiveEditRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveEditRelay")
            .field("page_key", &self.inner.page_key)
            .field("chain", &self.inner.chain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::VirtualElement;

    fn relay() -> LiveEditRelay {
        let surface = Surface::new(
            VirtualElement::new("main")
                .with_child(VirtualElement::new("h1").with_attr("data-editor-id", "hero-1.title").with_text("Old"))
                .with_child(VirtualElement::new("p").with_text("Body")),
        );
        LiveEditRelay::with_journal_limit("home", surface, ResolutionChain::standard(), 2)
    }

    #[test]
    fn test_apply_records_outcome() {
        let relay = relay();
        let outcome = relay.apply(&ElementEdit::new("hero-1.title", "textContent", "New"));
        assert_eq!(outcome, EditOutcome::Applied { strategy: "editor-id" });
        assert_eq!(relay.snapshot().element(&[0]).unwrap().text_content(), "New");
        assert_eq!(relay.journal()[0].edit_id, "hero-1.title");
    }

    #[test]
    fn test_unknown_property_is_apply_failure() {
        let relay = relay();
        let before = relay.snapshot();
        let outcome = relay.apply(&ElementEdit::new("hero-1.title", "onclick", "x"));
        assert!(matches!(outcome, EditOutcome::ApplyFailed { .. }));
        assert_eq!(relay.snapshot(), before);
    }

    #[test]
    fn test_journal_is_bounded() {
        let relay = relay();
        for value in ["a", "b", "c"] {
            relay.apply(&ElementEdit::new("hero-1.title", "textContent", value));
        }
        let journal = relay.journal();
        assert_eq!(journal.len(), 2);
        assert!(journal.iter().all(|e| e.outcome.is_applied()));
    }

    #[test]
    fn test_replace_surface() {
        let relay = relay();
        relay.replace_surface(Surface::new(VirtualElement::new("main")));
        let outcome = relay.apply(&ElementEdit::new("hero-1.title", "textContent", "New"));
        assert!(matches!(outcome, EditOutcome::ResolutionFailed { .. }));
    }
}
