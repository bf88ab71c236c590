//! Report composition and notification delivery
//!
//! This module builds the outbound message from a run's new matches and
//! the history snapshot, and defines the transport seam through which it
//! is delivered.

mod compose;
mod notify;

pub use compose::{compose, subject_line};
pub use notify::{Notifier, NotifyError, SmtpNotifier};
