// Address Derivation
//
// Program-derived addresses: hash the seeds plus a candidate bump together
// with the program id and keep the first candidate (scanning down from 255)
// that lands off the ed25519 curve. Off-curve addresses have no private key,
// so only the program can sign for them.

use solana_sdk::pubkey::{Pubkey, PubkeyError};
use spl_associated_token_account::get_associated_token_address;

use crate::constants::{TOKEN_VAULT_SEED, USER_STAKE_SEED, VAULT_SEED};
use crate::errors::{Result, VaultClientError};

/// Derive the PDA for `[namespace, owner]` under `program_id`.
pub fn derive(namespace: &[u8], owner: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive_from_seeds(namespace, &[owner.as_ref()], program_id)
}

/// Derive the PDA for `[namespace, owner, salt]` under `program_id`.
pub fn derive_salted(
    namespace: &[u8],
    owner: &Pubkey,
    salt: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive_from_seeds(namespace, &[owner.as_ref(), salt.as_ref()], program_id)
}

fn derive_from_seeds(
    namespace: &[u8],
    keys: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut seeds: Vec<&[u8]> = Vec::with_capacity(keys.len() + 2);
        seeds.push(namespace);
        seeds.extend_from_slice(keys);
        seeds.push(&bump_seed);

        match Pubkey::create_program_address(&seeds, program_id) {
            Ok(address) => return Ok((address, bump)),
            // On-curve candidate, try the next bump
            Err(PubkeyError::InvalidSeeds) => continue,
            Err(err) => {
                return Err(VaultClientError::InvalidSeeds {
                    namespace: String::from_utf8_lossy(namespace).into_owned(),
                    reason: err.to_string(),
                })
            }
        }
    }

    Err(VaultClientError::DerivationExhausted {
        namespace: String::from_utf8_lossy(namespace).into_owned(),
    })
}

// Vault state account: ["vault", authority]
pub fn derive_vault_pda(authority: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(VAULT_SEED, authority, program_id)
}

// Vault token account: ["token_vault", authority]
pub fn derive_token_vault_pda(authority: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(TOKEN_VAULT_SEED, authority, program_id)
}

// Per-user stake record: ["user_stake", owner, vault]
pub fn derive_user_stake_pda(
    owner: &Pubkey,
    vault: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive_salted(USER_STAKE_SEED, owner, vault, program_id)
}

/// The owner's associated token account for `mint`.
pub fn owner_token_account(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}
