// QUP Vault Client Constants

use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};

// PDA Seeds (must match the on-chain program)
pub const VAULT_SEED: &[u8] = b"vault";
pub const TOKEN_VAULT_SEED: &[u8] = b"token_vault";
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

// Instruction names hashed into discriminators
pub const INITIALIZE_VAULT_IX: &str = "initialize_vault";
pub const STAKE_IX: &str = "stake";
pub const UNSTAKE_IX: &str = "unstake";
pub const CLAIM_IX: &str = "claim";

// Account names hashed into account discriminators
pub const VAULT_ACCOUNT_NAME: &str = "Vault";
pub const USER_STAKE_ACCOUNT_NAME: &str = "UserStake";

pub const DISCRIMINATOR_LEN: usize = 8;

// Token decimals (1 QUPDEV = 1e9 minor units)
pub const DEFAULT_DECIMALS: u8 = 9;

// Minimum SOL kept back for transaction fees before a stake is submitted
pub const DEFAULT_FEE_RESERVE_LAMPORTS: u64 = LAMPORTS_PER_SOL / 100; // 0.01 SOL

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const BASIS_POINTS_DENOMINATOR: u128 = 10_000;

// Rent sysvar, passed to initialize_vault
pub const RENT_SYSVAR_ID: Pubkey = solana_sdk::pubkey!("SysvarRent111111111111111111111111111111111");
