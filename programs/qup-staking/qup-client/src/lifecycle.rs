// Stake Lifecycle State Machine
//
//   NoStake --stake--> Staked --claim--> Staked --unstake--> NoStake
//
// begin_* checks local guards and returns the instruction to submit; nothing
// changes until the matching on_*_result reports a confirmation. A rejected
// submission leaves the phase exactly where it was. At most one submission
// may be outstanding at a time.

use solana_msg::msg;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::amount::MinorUnitAmount;
use crate::config::VaultConfig;
use crate::errors::{Precondition, RejectionReason, Result, VaultClientError};
use crate::instructions::{encode, OperationKind, StakeAccounts, StakeIntent};
use crate::session::Confirmation;
use crate::state::StakeAccountRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakePhase {
    NoStake,
    Staked,
}

/// Balances the ledger client reported just before a stake attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletBalances {
    pub token: MinorUnitAmount,
    pub lamports: u64,
}

/// Local view of one (owner, vault) stake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeLifecycle {
    phase: StakePhase,
    pending: Option<OperationKind>,
    observed: Option<StakeAccountRecord>,
}

impl Default for StakeLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl StakeLifecycle {
    pub fn new() -> Self {
        Self {
            phase: StakePhase::NoStake,
            pending: None,
            observed: None,
        }
    }

    pub fn phase(&self) -> StakePhase {
        self.phase
    }

    pub fn pending(&self) -> Option<OperationKind> {
        self.pending
    }

    /// Stake record from the last `observe`. Every confirmed transition
    /// clears it; the on-chain record has changed and must be read again.
    pub fn observed_stake(&self) -> Option<&StakeAccountRecord> {
        self.observed.as_ref()
    }

    /// Re-sync the phase from an on-chain read of the user stake account.
    pub fn observe(&mut self, record: Option<StakeAccountRecord>) -> Result<StakePhase> {
        self.ensure_idle()?;

        self.phase = match record {
            Some(_) => StakePhase::Staked,
            None => StakePhase::NoStake,
        };
        self.observed = record;
        Ok(self.phase)
    }

    pub fn begin_stake(
        &mut self,
        config: &VaultConfig,
        owner: &Pubkey,
        intent: &StakeIntent,
        balances: &WalletBalances,
    ) -> Result<Instruction> {
        self.ensure_idle()?;
        ensure_kind(OperationKind::Stake, intent)?;

        if self.phase != StakePhase::NoStake {
            return Err(Precondition::StakeAlreadyActive.into());
        }
        intent.validate()?;
        if balances.token < intent.amount {
            return Err(Precondition::InsufficientTokenBalance {
                available: balances.token.get(),
                required: intent.amount.get(),
            }
            .into());
        }
        if balances.lamports < config.fee_reserve_lamports() {
            return Err(Precondition::InsufficientFeeReserve {
                available: balances.lamports,
                required: config.fee_reserve_lamports(),
            }
            .into());
        }

        let instruction = self.prepare(config, owner, intent)?;
        msg!(
            "Stake prepared: {} minor units for {} days",
            intent.amount,
            intent.duration_days
        );
        Ok(instruction)
    }

    pub fn on_stake_result(
        &mut self,
        outcome: std::result::Result<Confirmation, RejectionReason>,
    ) -> Result<StakePhase> {
        self.resolve(OperationKind::Stake, outcome, StakePhase::Staked)
    }

    pub fn begin_claim(&mut self, config: &VaultConfig, owner: &Pubkey) -> Result<Instruction> {
        self.begin_existing(config, owner, &StakeIntent::claim())
    }

    pub fn on_claim_result(
        &mut self,
        outcome: std::result::Result<Confirmation, RejectionReason>,
    ) -> Result<StakePhase> {
        self.resolve(OperationKind::Claim, outcome, StakePhase::Staked)
    }

    pub fn begin_unstake(&mut self, config: &VaultConfig, owner: &Pubkey) -> Result<Instruction> {
        self.begin_existing(config, owner, &StakeIntent::unstake())
    }

    pub fn on_unstake_result(
        &mut self,
        outcome: std::result::Result<Confirmation, RejectionReason>,
    ) -> Result<StakePhase> {
        self.resolve(OperationKind::Unstake, outcome, StakePhase::NoStake)
    }

    // Claim and unstake both need an existing stake account
    fn begin_existing(
        &mut self,
        config: &VaultConfig,
        owner: &Pubkey,
        intent: &StakeIntent,
    ) -> Result<Instruction> {
        self.ensure_idle()?;
        if self.phase != StakePhase::Staked {
            return Err(Precondition::NoActiveStake.into());
        }

        let instruction = self.prepare(config, owner, intent)?;
        msg!("{} prepared for {}", intent.kind.name(), owner);
        Ok(instruction)
    }

    fn prepare(
        &mut self,
        config: &VaultConfig,
        owner: &Pubkey,
        intent: &StakeIntent,
    ) -> Result<Instruction> {
        let accounts = StakeAccounts::for_owner(config, owner)?;
        let encoded = encode(intent, &accounts)?;
        self.pending = Some(intent.kind);
        Ok(encoded.into_instruction(*config.program_id()))
    }

    fn resolve(
        &mut self,
        kind: OperationKind,
        outcome: std::result::Result<Confirmation, RejectionReason>,
        confirmed_phase: StakePhase,
    ) -> Result<StakePhase> {
        if self.pending != Some(kind) {
            return Err(Precondition::NoPendingSubmission(kind).into());
        }
        self.pending = None;

        match outcome {
            Ok(confirmation) => {
                msg!("{} confirmed: {}", kind.name(), confirmation.signature);
                self.phase = confirmed_phase;
                self.observed = None;
                Ok(self.phase)
            }
            Err(reason) => {
                msg!("{} rejected: {}", kind.name(), reason);
                Err(VaultClientError::Rejected(reason))
            }
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.pending {
            Some(kind) => Err(Precondition::SubmissionPending(kind).into()),
            None => Ok(()),
        }
    }
}

fn ensure_kind(expected: OperationKind, intent: &StakeIntent) -> Result<()> {
    if intent.kind != expected {
        return Err(Precondition::IntentKindMismatch {
            expected,
            actual: intent.kind,
        }
        .into());
    }
    Ok(())
}
