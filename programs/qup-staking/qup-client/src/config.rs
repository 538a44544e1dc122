// Vault Configuration
//
// One immutable VaultConfig per process, built from trusted inputs before it
// is shared. The builder methods consume `self`, so a config handed to a
// session can no longer change.

use solana_sdk::pubkey::Pubkey;

use crate::constants::{DEFAULT_DECIMALS, DEFAULT_FEE_RESERVE_LAMPORTS};
use crate::errors::Result;
use crate::pda::{derive_token_vault_pda, derive_vault_pda};
use crate::rewards::StakingPlan;

#[derive(Debug, Clone, PartialEq)]
pub struct VaultConfig {
    program_id: Pubkey,
    token_mint: Pubkey,
    token_decimals: u8,
    vault: Pubkey,
    vault_token_account: Pubkey,
    fee_reserve_lamports: u64,
    plans: Vec<StakingPlan>,
}

impl VaultConfig {
    /// Config from already-known deployment addresses.
    pub fn new(
        program_id: Pubkey,
        token_mint: Pubkey,
        vault: Pubkey,
        vault_token_account: Pubkey,
    ) -> Self {
        Self {
            program_id,
            token_mint,
            token_decimals: DEFAULT_DECIMALS,
            vault,
            vault_token_account,
            fee_reserve_lamports: DEFAULT_FEE_RESERVE_LAMPORTS,
            plans: Vec::new(),
        }
    }

    /// Config for the vault owned by `authority`, deriving both vault PDAs.
    pub fn for_authority(program_id: Pubkey, token_mint: Pubkey, authority: &Pubkey) -> Result<Self> {
        let (vault, _) = derive_vault_pda(authority, &program_id)?;
        let (vault_token_account, _) = derive_token_vault_pda(authority, &program_id)?;
        Ok(Self::new(program_id, token_mint, vault, vault_token_account))
    }

    /// The QUPDEV staking vault on devnet.
    pub fn qupdev_devnet() -> Self {
        Self::new(
            QUPDEV_PROGRAM_ID,
            QUPDEV_MINT,
            QUPDEV_VAULT,
            QUPDEV_TOKEN_VAULT,
        )
        .with_plan(StakingPlan::new(1, 12.0))
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.token_decimals = decimals;
        self
    }

    pub fn with_fee_reserve(mut self, lamports: u64) -> Self {
        self.fee_reserve_lamports = lamports;
        self
    }

    pub fn with_plan(mut self, plan: StakingPlan) -> Self {
        self.plans.push(plan);
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn token_mint(&self) -> &Pubkey {
        &self.token_mint
    }

    pub fn token_decimals(&self) -> u8 {
        self.token_decimals
    }

    pub fn vault(&self) -> &Pubkey {
        &self.vault
    }

    pub fn vault_token_account(&self) -> &Pubkey {
        &self.vault_token_account
    }

    pub fn fee_reserve_lamports(&self) -> u64 {
        self.fee_reserve_lamports
    }

    pub fn plans(&self) -> &[StakingPlan] {
        &self.plans
    }

    /// Plan offered for `duration_days`, if the schedule has one.
    pub fn plan_for(&self, duration_days: u32) -> Option<&StakingPlan> {
        self.plans.iter().find(|plan| plan.duration_days == duration_days)
    }
}

// Devnet deployment
pub const QUPDEV_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("69GqjmqyXcL593ByVF4YqrFzBxHX5DsVcSRsAk49pPq7");
pub const QUPDEV_VAULT: Pubkey = solana_sdk::pubkey!("FGCLTzWpKHmPLcak8HcqP7j7wz7jjLTWzZ1SwKNFfzuz");
pub const QUPDEV_TOKEN_VAULT: Pubkey = solana_sdk::pubkey!("HCw3qKrvemEwYzAzozqtwBtdapsWe7GfeCKjrUUPNSQf");
pub const QUPDEV_MINT: Pubkey = solana_sdk::pubkey!("8bjKA2mkXMdkUHC6m8TfyQcksTDLKeP61XmFFcVViYef");

/// Display metadata for a stake-token mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
}

const UNKNOWN_TOKEN: TokenInfo = TokenInfo {
    symbol: "UNKNOWN",
    name: "Unknown Token",
    decimals: DEFAULT_DECIMALS,
};

const KNOWN_TOKENS: &[(Pubkey, TokenInfo)] = &[(
    QUPDEV_MINT,
    TokenInfo {
        symbol: "QUPDEV",
        name: "QUP Development Token",
        decimals: 9,
    },
)];

/// Metadata for `mint`, if it is a registered token.
pub fn known_token(mint: &Pubkey) -> Option<TokenInfo> {
    KNOWN_TOKENS
        .iter()
        .find(|(known, _)| known == mint)
        .map(|(_, info)| *info)
}

/// Metadata for `mint`, falling back to an "UNKNOWN" 9-decimal token.
pub fn token_info_or_unknown(mint: &Pubkey) -> TokenInfo {
    known_token(mint).unwrap_or(UNKNOWN_TOKEN)
}
