// QUP Vault Client Errors
//
// Pure-function failures (DerivationExhausted, TruncatedRecord, the
// discriminator errors) are contract violations and surface immediately.
// Precondition failures never touch lifecycle state. Ledger rejections are
// passed through verbatim, logs included.

use std::fmt;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::instructions::OperationKind;

pub type Result<T> = std::result::Result<T, VaultClientError>;

#[derive(Debug, Error)]
pub enum VaultClientError {
    #[error("No off-curve bump found for seed namespace {namespace:?}")]
    DerivationExhausted { namespace: String },

    #[error("Invalid seeds for namespace {namespace:?}: {reason}")]
    InvalidSeeds { namespace: String, reason: String },

    #[error("Truncated {kind}: expected at least {expected} bytes, got {actual}")]
    TruncatedRecord {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Discriminator mismatch for {kind}: expected {expected:?}, found {found:?}")]
    DiscriminatorMismatch {
        kind: &'static str,
        expected: [u8; 8],
        found: [u8; 8],
    },

    #[error("Unknown instruction discriminator {0:?}")]
    UnknownDiscriminator([u8; 8]),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(#[from] Precondition),

    #[error("Ledger rejected the submission: {0}")]
    Rejected(#[from] RejectionReason),

    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("Invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: &'static str },

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Serialization failed: {0}")]
    Serialization(#[from] std::io::Error),
}

/// Local guard that rejected a transition before anything was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("stake amount must be greater than zero")]
    ZeroAmount,

    #[error("stake duration must be greater than zero days")]
    ZeroDuration,

    #[error("insufficient token balance: have {available}, need {required}")]
    InsufficientTokenBalance { available: u64, required: u64 },

    #[error("insufficient SOL for fees: have {available} lamports, need {required}")]
    InsufficientFeeReserve { available: u64, required: u64 },

    #[error("a stake is already active for this vault")]
    StakeAlreadyActive,

    #[error("no stake account exists for this vault")]
    NoActiveStake,

    #[error("{0:?} submission still awaiting confirmation")]
    SubmissionPending(OperationKind),

    #[error("no pending {0:?} submission to resolve")]
    NoPendingSubmission(OperationKind),

    #[error("intent kind {actual:?} cannot start a {expected:?} transition")]
    IntentKindMismatch {
        expected: OperationKind,
        actual: OperationKind,
    },

    #[error("vault account {0} already exists")]
    VaultAlreadyInitialized(Pubkey),
}

/// Opaque failure reported by the ledger client: network errors, signature
/// rejection, simulation or program errors. `logs` carries simulation output
/// when the ledger produced any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionReason {
    pub message: String,
    pub logs: Vec<String>,
}

impl RejectionReason {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            logs: Vec::new(),
        }
    }

    pub fn with_logs(message: impl Into<String>, logs: Vec<String>) -> Self {
        Self {
            message: message.into(),
            logs,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for line in &self.logs {
            write!(f, "\n  {}", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for RejectionReason {}
