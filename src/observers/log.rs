//! # Simple logging observer for debugging and demos.
//!
//! [`LogWriter`] prints notifications to stdout in a human-readable format.
//! Enabled via the `logging` feature; primarily useful for development and
//! examples.
//!
//! ## Output format
//! ```text
//! [welcome] connected; 2 pending event(s)
//! [overlap] 'standup' overlaps with 'retro'
//! [pre-start] 'standup' is about to start
//! [completed] 'standup' has completed
//! ```

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::events::{Notification, NotificationKind};
use crate::observers::Observe;

/// Simple stdout logging observer.
///
/// Not intended for production use; implement a custom [`Observe`] for real
/// transports or structured logging.
pub struct LogWriter;

#[async_trait]
impl Observe for LogWriter {
    async fn on_notify(&self, n: &Notification) -> Result<(), NotifyError> {
        match n.kind {
            NotificationKind::Welcome => println!("[welcome] {}", n.message),
            NotificationKind::OverlapWarning => println!("[overlap] {}", n.message),
            NotificationKind::PreStart => println!("[pre-start] {}", n.message),
            NotificationKind::Completion => println!("[completed] {}", n.message),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
