//! # Observer trait.
//!
//! [`Observe`] is the seam between the engine and the transport layer: one
//! implementation per connected client. The hub gives every observer a
//! dedicated bounded queue and worker task, so a slow or broken observer
//! never stalls the ticker, the insert path, or other observers.
//!
//! ## Rules
//! - Delivery is FIFO per observer.
//! - A returned [`NotifyError`] (or a panic) unregisters the observer; there
//!   are no retries.
//! - Queue overflow drops the notification for this observer only.
//!
//! ## Implementing an observer
//! ```rust
//! use async_trait::async_trait;
//! use eventcast::{Notification, NotifyError, Observe};
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl Observe for Printer {
//!     async fn on_notify(&self, n: &Notification) -> Result<(), NotifyError> {
//!         println!("{}", n.message);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "printer" }
//! }
//! ```

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::events::Notification;

/// A connected client receiving push notifications.
///
/// Implementations wrap one transport connection (a WebSocket session, a
/// channel into a UI, ...). The transport write should be bounded or
/// non-blocking; report a dead connection with [`NotifyError::Closed`]
/// rather than blocking indefinitely.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Delivers a single notification.
    ///
    /// Called from this observer's dedicated worker task, never from the
    /// producer context. An `Err` return unregisters the observer.
    async fn on_notify(&self, notification: &Notification) -> Result<(), NotifyError>;

    /// Returns the observer name used in logs.
    ///
    /// Prefer short, descriptive names. The default uses
    /// `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this observer.
    ///
    /// When the queue is full, new notifications are dropped for this
    /// observer only. The hub clamps capacity to a minimum of 1.
    ///
    /// Default: 256.
    fn queue_capacity(&self) -> usize {
        256
    }
}
