// QUP Vault Client
//
// Client-side protocol core for the QUP token-staking vault program.
//
// Modules:
// - pda: program-derived addresses (vault, token vault, user stake)
// - discriminator: sha256 instruction/account selectors
// - instructions: initialize_vault, stake, unstake, claim encoding
// - state: vault and user stake account decoding
// - rewards: APY estimates and on-chain accrual
// - lifecycle: NoStake/Staked state machine, confirm-then-transition
// - session: ledger client seam and the per-owner staking session

pub mod amount;
pub mod config;
pub mod constants;
pub mod discriminator;
pub mod errors;
pub mod instructions;
pub mod lifecycle;
pub mod pda;
pub mod rewards;
pub mod session;
pub mod state;

pub use amount::{DisplayAmount, MinorUnitAmount};
pub use config::VaultConfig;
pub use discriminator::{account_discriminator_for, discriminator_for};
pub use errors::{Precondition, RejectionReason, Result, VaultClientError};
pub use instructions::{encode, EncodedInstruction, OperationKind, StakeIntent, VaultInstruction};
pub use lifecycle::{StakeLifecycle, StakePhase, WalletBalances};
pub use pda::derive;
pub use rewards::{daily_rate, days_elapsed, pending_rewards, projected_total};
pub use session::{Confirmation, LedgerClient, StakingSession};
pub use state::{decode, decode_checked, AccountRecord, StakeAccountRecord, VaultAccountRecord};
