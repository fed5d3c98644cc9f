//! # User Notifications
//!
//! Every failed cart operation shows exactly one short message to the user.
//! The cart store picks the message from the catalog below and hands it to
//! a [`NotificationSink`]; what the sink does with it (toast, log line,
//! channel to a UI task) is up to the host.
//!
//! ## Message Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartErrorKind        Add               Remove            UpdateAmount  │
//! │  ──────────────────   ───────────────   ───────────────   ────────────  │
//! │  OutOfStock           out of stock      (n/a)             out of stock  │
//! │  ProductNotInCart     adding failed     removing failed   changing …    │
//! │  InvalidAmount        adding failed     removing failed   changing …    │
//! │  UpstreamFailure      adding failed     removing failed   changing …    │
//! │  Storage              adding failed     removing failed   changing …    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shoecart_core::{CartErrorKind, Locale};
use std::fmt;
use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::store::CartOperation;

// =============================================================================
// Message Catalog
// =============================================================================

/// The message shown for a failed `operation`.
///
/// Out-of-stock has its own message regardless of the operation; any other
/// failure gets the operation's generic message.
pub fn message_for(locale: Locale, operation: CartOperation, kind: CartErrorKind) -> &'static str {
    if kind == CartErrorKind::OutOfStock {
        return match locale {
            Locale::PtBr => "Quantidade solicitada fora de estoque",
            Locale::En => "Requested quantity out of stock",
        };
    }

    match (locale, operation) {
        (Locale::PtBr, CartOperation::Add) => "Erro na adição do produto",
        (Locale::PtBr, CartOperation::Remove) => "Erro na remoção do produto",
        (Locale::PtBr, CartOperation::UpdateAmount) => "Erro na alteração de quantidade do produto",
        (Locale::En, CartOperation::Add) => "Error adding product",
        (Locale::En, CartOperation::Remove) => "Error removing product",
        (Locale::En, CartOperation::UpdateAmount) => "Error changing product quantity",
    }
}

// =============================================================================
// Sink Trait
// =============================================================================

/// Receives user-facing error messages from the cart store.
pub trait NotificationSink: Send + Sync {
    /// Show `message` to the user.
    fn report_error(&self, message: &str);
}

/// A notification as delivered over a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn report_error(&self, message: &str) {
        error!(notification = %message, "Cart notification");
    }
}

/// Discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

impl NotificationSink for NoOpNotifier {
    fn report_error(&self, _message: &str) {}
}

/// Forwards notifications to a receiver, typically a UI task.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl NotificationSink for ChannelNotifier {
    fn report_error(&self, message: &str) {
        let notice = Notice {
            message: message.to_string(),
        };
        if self.tx.send(notice).is_err() {
            warn!(notification = %message, "Notification receiver dropped");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
