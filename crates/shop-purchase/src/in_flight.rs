//! At most one active submission per invoice

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of invoices currently being submitted
///
/// Flows sharing a registry cannot submit the same invoice concurrently.
#[derive(Debug, Clone, Default)]
pub struct InFlightPurchases {
    invoices: Arc<Mutex<HashSet<String>>>,
}

impl InFlightPurchases {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `invoice_id`; `None` if another submission holds it
    pub fn claim(&self, invoice_id: &str) -> Option<InFlightGuard> {
        let inserted = self
            .invoices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(invoice_id.to_string());

        inserted.then(|| InFlightGuard {
            invoices: Arc::clone(&self.invoices),
            invoice_id: invoice_id.to_string(),
        })
    }

    /// Whether `invoice_id` is being submitted
    pub fn contains(&self, invoice_id: &str) -> bool {
        self.invoices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(invoice_id)
    }
}

/// Releases its invoice when dropped
#[derive(Debug)]
pub struct InFlightGuard {
    invoices: Arc<Mutex<HashSet<String>>>,
    invoice_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.invoices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.invoice_id);
    }
}
