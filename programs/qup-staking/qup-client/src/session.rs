// Staking Session
//
// One explicit session per (owner, vault): the vault config, the owner key,
// the ledger client and the stake lifecycle. Every network effect goes
// through LedgerClient; blocking, cancellation and timeouts belong to its
// implementation.

use solana_msg::msg;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Signature};

use crate::amount::{DisplayAmount, MinorUnitAmount};
use crate::config::VaultConfig;
use crate::errors::{Precondition, RejectionReason, Result, VaultClientError};
use crate::instructions::{encode_initialize_vault, InitializeVaultAccounts, InitializeVaultArgs, StakeIntent};
use crate::lifecycle::{StakeLifecycle, StakePhase, WalletBalances};
use crate::pda::{derive_user_stake_pda, owner_token_account};
use crate::rewards::{RewardView, StakePosition, StakingPlan};
use crate::state::{decode_checked, StakeAccountRecord, VaultAccountRecord};

/// A confirmed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub signature: Signature,
}

/// Ledger access supplied by the host: signing, broadcasting, confirmation
/// and account reads.
pub trait LedgerClient {
    /// Sign, send and wait for confirmation of a single-instruction
    /// transaction.
    fn submit_and_confirm(
        &mut self,
        instruction: Instruction,
    ) -> std::result::Result<Confirmation, RejectionReason>;

    /// Raw account data, `None` when the account does not exist.
    fn read_account(&self, address: &Pubkey) -> std::result::Result<Option<Vec<u8>>, RejectionReason>;

    /// Cluster time in unix seconds.
    fn current_timestamp(&self) -> std::result::Result<i64, RejectionReason>;

    /// Token balance of an SPL token account in minor units, `None` when the
    /// token account does not exist.
    fn token_balance(
        &self,
        token_account: &Pubkey,
    ) -> std::result::Result<Option<u64>, RejectionReason>;

    /// Native balance in lamports.
    fn native_balance(&self, address: &Pubkey) -> std::result::Result<u64, RejectionReason>;
}

pub struct StakingSession<L: LedgerClient> {
    config: VaultConfig,
    owner: Pubkey,
    ledger: L,
    lifecycle: StakeLifecycle,
}

impl<L: LedgerClient> StakingSession<L> {
    pub fn new(config: VaultConfig, owner: Pubkey, ledger: L) -> Self {
        Self {
            config,
            owner,
            ledger,
            lifecycle: StakeLifecycle::new(),
        }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn lifecycle(&self) -> &StakeLifecycle {
        &self.lifecycle
    }

    pub fn phase(&self) -> StakePhase {
        self.lifecycle.phase()
    }

    pub fn user_stake_address(&self) -> Result<Pubkey> {
        let (address, _) =
            derive_user_stake_pda(&self.owner, self.config.vault(), self.config.program_id())?;
        Ok(address)
    }

    /// Read the user stake account and re-sync the lifecycle from it.
    pub fn refresh(&mut self) -> Result<Option<StakeAccountRecord>> {
        let record = self.read_stake_record()?;
        let phase = self.lifecycle.observe(record)?;
        msg!("Stake refreshed for {}: {:?}", self.owner, phase);
        Ok(record)
    }

    /// Current vault account snapshot.
    pub fn vault_state(&self) -> Result<VaultAccountRecord> {
        let vault = *self.config.vault();
        let data = self
            .ledger
            .read_account(&vault)?
            .ok_or(VaultClientError::AccountNotFound(vault))?;
        decode_checked(&data)
    }

    /// Token and SOL balances of the owner. A missing token account holds
    /// nothing.
    pub fn wallet_balances(&self) -> Result<WalletBalances> {
        let token_account = owner_token_account(&self.owner, self.config.token_mint());
        let token = self.ledger.token_balance(&token_account)?.unwrap_or(0);
        Ok(WalletBalances {
            token: MinorUnitAmount::new(token),
            lamports: self.ledger.native_balance(&self.owner)?,
        })
    }

    /// Create the vault with the session owner as authority.
    ///
    /// Refused when the derived vault account already exists.
    pub fn initialize_vault(&mut self) -> Result<Confirmation> {
        let (accounts, bump) = InitializeVaultAccounts::for_authority(
            &self.owner,
            self.config.token_mint(),
            self.config.program_id(),
        )?;

        if self.ledger.read_account(&accounts.vault)?.is_some() {
            return Err(Precondition::VaultAlreadyInitialized(accounts.vault).into());
        }

        let instruction = encode_initialize_vault(InitializeVaultArgs { bump }, &accounts)?
            .into_instruction(*self.config.program_id());
        msg!("Initializing vault {} (bump {})", accounts.vault, bump);

        let confirmation = self.ledger.submit_and_confirm(instruction)?;
        msg!("Vault initialized: {}", confirmation.signature);
        Ok(confirmation)
    }

    pub fn stake(&mut self, intent: StakeIntent) -> Result<StakePhase> {
        let balances = self.wallet_balances()?;
        let instruction = self
            .lifecycle
            .begin_stake(&self.config, &self.owner, &intent, &balances)?;
        let outcome = self.ledger.submit_and_confirm(instruction);
        self.lifecycle.on_stake_result(outcome)
    }

    /// Stake a human-entered amount such as `"25"` or `"0.5"`.
    pub fn stake_display(&mut self, amount: &str, duration_days: u32) -> Result<StakePhase> {
        let amount = MinorUnitAmount::from_display_str(amount, self.config.token_decimals())?;
        self.stake(StakeIntent::stake(amount, duration_days))
    }

    pub fn claim(&mut self) -> Result<StakePhase> {
        let instruction = self.lifecycle.begin_claim(&self.config, &self.owner)?;
        let outcome = self.ledger.submit_and_confirm(instruction);
        self.lifecycle.on_claim_result(outcome)
    }

    pub fn unstake(&mut self) -> Result<StakePhase> {
        let instruction = self.lifecycle.begin_unstake(&self.config, &self.owner)?;
        let outcome = self.ledger.submit_and_confirm(instruction);
        self.lifecycle.on_unstake_result(outcome)
    }

    /// Accrued position, `None` when the owner has no stake account.
    pub fn position(&self) -> Result<Option<StakePosition>> {
        let Some(stake) = self.read_stake_record()? else {
            return Ok(None);
        };
        let vault = self.vault_state()?;
        let now = self.ledger.current_timestamp()?;
        StakePosition::from_records(&stake, &vault, now).map(Some)
    }

    /// Estimate for `plan` while no stake exists, otherwise the accrued
    /// position.
    pub fn reward_view(&self, plan: &StakingPlan, principal: DisplayAmount) -> Result<RewardView> {
        match self.position()? {
            Some(position) => Ok(RewardView::Accrued(position)),
            None => Ok(RewardView::Estimate(plan.quote(principal))),
        }
    }

    fn read_stake_record(&self) -> Result<Option<StakeAccountRecord>> {
        let address = self.user_stake_address()?;
        match self.ledger.read_account(&address)? {
            Some(data) if !data.is_empty() => decode_checked(&data).map(Some),
            _ => Ok(None),
        }
    }
}
