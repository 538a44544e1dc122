// Vault account record
//
// Layout: [discriminator: 8][authority: 32][token_mint: 32][token_vault: 32]
//         [total_staked: u64][reward_rate_bps_per_day: u64][last_update_ts: i64]

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{DISCRIMINATOR_LEN, VAULT_ACCOUNT_NAME};
use crate::errors::Result;
use crate::state::AccountRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultAccountRecord {
    pub authority: Pubkey,         // Vault admin
    pub token_mint: Pubkey,        // Stake token mint
    pub token_vault: Pubkey,       // Token account holding staked funds
    pub total_staked: u64,         // Minor units across all stakers
    pub reward_rate_bps: u64,      // Basis points per day
    pub last_update_ts: i64,       // Unix seconds
}

// Wire image of the fields after the discriminator
#[derive(BorshSerialize, BorshDeserialize)]
struct VaultAccountLayout {
    authority: [u8; 32],
    token_mint: [u8; 32],
    token_vault: [u8; 32],
    total_staked: u64,
    reward_rate_bps: u64,
    last_update_ts: i64,
}

impl AccountRecord for VaultAccountRecord {
    const ACCOUNT_NAME: &'static str = VAULT_ACCOUNT_NAME;
    const LEN: usize = DISCRIMINATOR_LEN + 32 + 32 + 32 + 8 + 8 + 8;

    fn decode_fields(data: &[u8]) -> Result<Self> {
        let mut fields = &data[DISCRIMINATOR_LEN..];
        let layout = VaultAccountLayout::deserialize(&mut fields)?;

        Ok(Self {
            authority: Pubkey::new_from_array(layout.authority),
            token_mint: Pubkey::new_from_array(layout.token_mint),
            token_vault: Pubkey::new_from_array(layout.token_vault),
            total_staked: layout.total_staked,
            reward_rate_bps: layout.reward_rate_bps,
            last_update_ts: layout.last_update_ts,
        })
    }
}

impl VaultAccountRecord {
    /// Serialize into account bytes, discriminator first.
    pub fn to_account_data(&self) -> Result<Vec<u8>> {
        let layout = VaultAccountLayout {
            authority: self.authority.to_bytes(),
            token_mint: self.token_mint.to_bytes(),
            token_vault: self.token_vault.to_bytes(),
            total_staked: self.total_staked,
            reward_rate_bps: self.reward_rate_bps,
            last_update_ts: self.last_update_ts,
        };

        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::discriminator());
        layout.serialize(&mut data)?;
        Ok(data)
    }
}
