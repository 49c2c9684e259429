//! Redis stream replies decoded with [`resputil`].

mod entry_id;
mod pending;

pub use entry_id::StreamEntryId;
pub use pending::{PendingMessage, PendingMessages, PendingSummary};
