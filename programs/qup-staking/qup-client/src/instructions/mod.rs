// Instruction Codec
//
// Every instruction is [8-byte discriminator][little-endian args]. Account
// lists are fixed per operation kind and never depend on intent values.

pub mod claim;
pub mod initialize_vault;
pub mod stake;
pub mod unstake;

pub use claim::*;
pub use initialize_vault::*;
pub use stake::*;
pub use unstake::*;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::amount::MinorUnitAmount;
use crate::constants::{CLAIM_IX, DISCRIMINATOR_LEN, INITIALIZE_VAULT_IX, STAKE_IX, UNSTAKE_IX};
use crate::discriminator::{discriminator_for, Discriminator};
use crate::errors::{Precondition, Result, VaultClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    InitializeVault,
    Stake,
    Unstake,
    Claim,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::InitializeVault,
        OperationKind::Stake,
        OperationKind::Unstake,
        OperationKind::Claim,
    ];

    /// Instruction name as declared by the on-chain program.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::InitializeVault => INITIALIZE_VAULT_IX,
            OperationKind::Stake => STAKE_IX,
            OperationKind::Unstake => UNSTAKE_IX,
            OperationKind::Claim => CLAIM_IX,
        }
    }

    pub fn discriminator(self) -> Discriminator {
        discriminator_for(self.name())
    }

    pub fn from_discriminator(discriminator: &Discriminator) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.discriminator() == *discriminator)
    }
}

/// A not-yet-submitted user operation against a stake.
///
/// `amount` is in minor units. Unstake and Claim always act on everything, so
/// their amount and duration are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeIntent {
    pub kind: OperationKind,
    pub amount: MinorUnitAmount,
    pub duration_days: u32,
}

impl StakeIntent {
    pub fn stake(amount: MinorUnitAmount, duration_days: u32) -> Self {
        Self {
            kind: OperationKind::Stake,
            amount,
            duration_days,
        }
    }

    pub fn unstake() -> Self {
        Self {
            kind: OperationKind::Unstake,
            amount: MinorUnitAmount::ZERO,
            duration_days: 0,
        }
    }

    pub fn claim() -> Self {
        Self {
            kind: OperationKind::Claim,
            amount: MinorUnitAmount::ZERO,
            duration_days: 0,
        }
    }

    /// Stake intents need a non-zero amount and duration before encoding.
    pub fn validate(&self) -> Result<()> {
        if self.kind == OperationKind::Stake {
            if self.amount.is_zero() {
                return Err(Precondition::ZeroAmount.into());
            }
            if self.duration_days == 0 {
                return Err(Precondition::ZeroDuration.into());
            }
        }
        Ok(())
    }
}

/// Encoded payload plus the ordered account roles it must be sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInstruction {
    pub kind: OperationKind,
    pub data: Vec<u8>,
    pub accounts: Vec<AccountMeta>,
}

impl EncodedInstruction {
    pub fn into_instruction(self, program_id: Pubkey) -> Instruction {
        Instruction {
            program_id,
            accounts: self.accounts,
            data: self.data,
        }
    }
}

/// Encode a user intent against the stake accounts of one (owner, vault) pair.
pub fn encode(intent: &StakeIntent, accounts: &StakeAccounts) -> Result<EncodedInstruction> {
    intent.validate()?;

    match intent.kind {
        OperationKind::Stake => {
            encode_stake(StakeArgs::new(intent.amount, intent.duration_days), accounts)
        }
        OperationKind::Unstake => Ok(encode_unstake(accounts)),
        OperationKind::Claim => Ok(encode_claim(accounts)),
        // Initialization is an authority operation with its own accounts
        OperationKind::InitializeVault => Err(Precondition::IntentKindMismatch {
            expected: OperationKind::Stake,
            actual: OperationKind::InitializeVault,
        }
        .into()),
    }
}

/// Decoded instruction payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultInstruction {
    InitializeVault(InitializeVaultArgs),
    Stake(StakeArgs),
    Unstake,
    Claim,
}

impl VaultInstruction {
    pub fn kind(&self) -> OperationKind {
        match self {
            VaultInstruction::InitializeVault(_) => OperationKind::InitializeVault,
            VaultInstruction::Stake(_) => OperationKind::Stake,
            VaultInstruction::Unstake => OperationKind::Unstake,
            VaultInstruction::Claim => OperationKind::Claim,
        }
    }

    /// Decode instruction data, matching the discriminator against the four
    /// known operations.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(VaultClientError::TruncatedRecord {
                kind: "instruction",
                expected: DISCRIMINATOR_LEN,
                actual: data.len(),
            });
        }

        let (head, args) = data.split_at(DISCRIMINATOR_LEN);
        let mut discriminator = [0u8; DISCRIMINATOR_LEN];
        discriminator.copy_from_slice(head);

        let kind = OperationKind::from_discriminator(&discriminator)
            .ok_or(VaultClientError::UnknownDiscriminator(discriminator))?;

        Ok(match kind {
            OperationKind::InitializeVault => {
                VaultInstruction::InitializeVault(decode_args(kind, args, InitializeVaultArgs::LEN)?)
            }
            OperationKind::Stake => VaultInstruction::Stake(decode_args(kind, args, StakeArgs::LEN)?),
            OperationKind::Unstake => VaultInstruction::Unstake,
            OperationKind::Claim => VaultInstruction::Claim,
        })
    }
}

// Discriminator followed by borsh-serialized args
pub(crate) fn instruction_data<A: BorshSerialize>(kind: OperationKind, args: &A) -> Result<Vec<u8>> {
    let mut data = kind.discriminator().to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}

fn decode_args<A: BorshDeserialize>(kind: OperationKind, mut args: &[u8], len: usize) -> Result<A> {
    if args.len() < len {
        return Err(VaultClientError::TruncatedRecord {
            kind: kind.name(),
            expected: DISCRIMINATOR_LEN + len,
            actual: DISCRIMINATOR_LEN + args.len(),
        });
    }
    Ok(A::deserialize(&mut args)?)
}
