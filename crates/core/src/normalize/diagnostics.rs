//! Structured normalization diagnostics.
//!
//! When an order normalizes to something suspiciously empty - no items, no
//! delivery destination - operations wants to know which source fields were
//! looked at. Diagnostics flow through an injected [`DiagnosticSink`]
//! capability so the portal logs them while tests assert on them; they never
//! raise errors and never change the normalizer's output.

use std::sync::{Mutex, PoisonError};

/// A non-fatal finding emitted while normalizing one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeDiagnostic {
    /// Both `items` and `items_summary` came out empty.
    MissingItems {
        /// Order id, falling back to order number.
        order_ref: String,
        had_order_lines: bool,
        had_products: bool,
        had_items: bool,
        had_items_summary: bool,
    },
    /// Neither a shipping address nor a pickup location was found.
    MissingAddress {
        /// Order id, falling back to order number.
        order_ref: String,
        /// Source locations the address resolution looked at.
        checked: Vec<&'static str>,
    },
}

/// Capability for receiving [`NormalizeDiagnostic`]s, supplied by the caller.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: NormalizeDiagnostic);
}

/// Default sink: structured `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: NormalizeDiagnostic) {
        match diagnostic {
            NormalizeDiagnostic::MissingItems {
                order_ref,
                had_order_lines,
                had_products,
                had_items,
                had_items_summary,
            } => {
                tracing::warn!(
                    order = %order_ref,
                    had_order_lines,
                    had_products,
                    had_items,
                    had_items_summary,
                    "order has no items after normalization"
                );
            }
            NormalizeDiagnostic::MissingAddress { order_ref, checked } => {
                tracing::warn!(
                    order = %order_ref,
                    checked = ?checked,
                    "order has no shipping address or pickup location after normalization"
                );
            }
        }
    }
}

/// Recording sink for tests and the CLI's verbose mode.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<NormalizeDiagnostic>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics emitted so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<NormalizeDiagnostic> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain and return the recorded diagnostics.
    #[must_use]
    pub fn take(&self) -> Vec<NormalizeDiagnostic> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: NormalizeDiagnostic) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
