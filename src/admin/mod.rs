/**
 * Admin Flows
 * List pages, the delete confirmation dialog and the message inbox
 */
pub mod delete;
pub mod inbox;
pub mod listing;

pub use delete::{DeleteFlow, DeleteState};
pub use inbox::Inbox;
pub use listing::AdminList;
