//! Transaction scopes
//!
//! A [`TransactionScope`] owns the open transaction of a document for its
//! lifetime. Dropping a scope that was neither committed nor rolled back
//! rolls it back, so no exit path leaves a transaction open.

use serde::{Deserialize, Serialize};

use super::{DocumentResult, ModelDocument};

/// State of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Open, changes pending
    Started,
    /// Changes made permanent
    Committed,
    /// Changes discarded
    RolledBack,
}

/// Guard over one open transaction
pub struct TransactionScope<'d, D: ModelDocument + ?Sized> {
    document: &'d mut D,
    label: String,
    status: TransactionStatus,
}

impl<'d, D: ModelDocument + ?Sized> TransactionScope<'d, D> {
    /// Open a transaction on `document`
    pub fn start(document: &'d mut D, label: impl Into<String>) -> DocumentResult<Self> {
        let label = label.into();
        document.start_transaction(&label)?;
        tracing::debug!("Started transaction '{}'", label);
        Ok(Self {
            document,
            label,
            status: TransactionStatus::Started,
        })
    }

    /// Transaction label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current state
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Write access to the document while the transaction is open
    pub fn document_mut(&mut self) -> &mut D {
        &mut *self.document
    }

    /// Commit the transaction
    ///
    /// If the document refuses the commit, the scope is rolled back on drop.
    pub fn commit(mut self) -> DocumentResult<TransactionStatus> {
        self.document.commit_transaction()?;
        self.status = TransactionStatus::Committed;
        tracing::debug!("Committed transaction '{}'", self.label);
        Ok(self.status)
    }

    /// Roll the transaction back
    pub fn roll_back(mut self) -> DocumentResult<TransactionStatus> {
        // Marked first so a failing rollback is not retried on drop
        self.status = TransactionStatus::RolledBack;
        self.document.rollback_transaction()?;
        tracing::debug!("Rolled back transaction '{}'", self.label);
        Ok(self.status)
    }
}

impl<D: ModelDocument + ?Sized> Drop for TransactionScope<'_, D> {
    fn drop(&mut self) {
        if self.status != TransactionStatus::Started {
            return;
        }
        tracing::warn!("Transaction '{}' dropped while open, rolling back", self.label);
        self.status = TransactionStatus::RolledBack;
        if let Err(e) = self.document.rollback_transaction() {
            tracing::error!("Failed to roll back transaction '{}': {}", self.label, e);
        }
    }
}
