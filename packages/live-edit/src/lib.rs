//! # Pagecraft Live Edit
//!
//! Applies granular element edits to an already rendered page without a
//! republish. Edits never touch the template document.
//!
//! ```text
//! EditChannel ──ElementEdit──▶ LiveEditRelay
//!                                  │
//!                                  ├─ ResolutionChain: locator → editor id → positional
//!                                  ├─ apply_property on the resolved element
//!                                  └─ journal (bounded, per-edit outcome)
//! ```

mod apply;
mod channel;
mod error;
pub mod locator;
mod relay;
pub mod resolve;
mod surface;

pub use apply::{apply_property, apply_raw};
pub use channel::{BroadcastEditHub, DeliveryGate, EditCallback, EditChannel, SubscriptionHandle};
pub use error::{ApplyError, LiveEditError, LocatorError, ResolutionError};
pub use locator::Locator;
pub use relay::{EditOutcome, JournalEntry, LiveEditRelay, DEFAULT_JOURNAL_LIMIT};
pub use resolve::{EditorIdStrategy, LocatorStrategy, PositionalStrategy, ResolutionChain, ResolutionStrategy};
pub use surface::{NodePath, Surface};
