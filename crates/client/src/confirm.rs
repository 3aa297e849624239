//! Confirmation gate for destructive operations.

/// Prompt shown before an expert is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this expert?";

/// Asks the user to approve a destructive operation.
pub trait Confirm {
    /// Return `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Approves every prompt, for non-interactive use (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Result of a confirmed delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The API deleted the record.
    Deleted,
    /// The user declined; no request was sent.
    Cancelled,
}
