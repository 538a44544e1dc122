// On-chain account records
//
// Snapshots decoded from raw account bytes. The client never writes these;
// every mutation happens by submitting instructions.

pub mod stake_account;
pub mod vault_account;

pub use stake_account::*;
pub use vault_account::*;

use crate::constants::DISCRIMINATOR_LEN;
use crate::discriminator::{account_discriminator_for, Discriminator};
use crate::errors::{Result, VaultClientError};

/// A fixed-layout account record: 8-byte discriminator, then fields at fixed
/// offsets.
pub trait AccountRecord: Sized {
    /// Account type name hashed into the discriminator
    const ACCOUNT_NAME: &'static str;
    /// Minimum byte length, discriminator included
    const LEN: usize;

    /// Read the fields after the discriminator. `data` is at least `LEN` long.
    fn decode_fields(data: &[u8]) -> Result<Self>;

    fn discriminator() -> Discriminator {
        account_discriminator_for(Self::ACCOUNT_NAME)
    }
}

/// Decode `data` as `R` without checking the discriminator.
///
/// Callers that have not already matched the discriminator should use
/// [`decode_checked`]; reading the wrong account kind here decodes garbage.
pub fn decode<R: AccountRecord>(data: &[u8]) -> Result<R> {
    if data.len() < R::LEN {
        return Err(VaultClientError::TruncatedRecord {
            kind: R::ACCOUNT_NAME,
            expected: R::LEN,
            actual: data.len(),
        });
    }
    R::decode_fields(data)
}

/// Decode `data` as `R` after verifying its account discriminator.
pub fn decode_checked<R: AccountRecord>(data: &[u8]) -> Result<R> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(VaultClientError::TruncatedRecord {
            kind: R::ACCOUNT_NAME,
            expected: R::LEN,
            actual: data.len(),
        });
    }

    let expected = R::discriminator();
    let mut found = [0u8; DISCRIMINATOR_LEN];
    found.copy_from_slice(&data[..DISCRIMINATOR_LEN]);
    if found != expected {
        return Err(VaultClientError::DiscriminatorMismatch {
            kind: R::ACCOUNT_NAME,
            expected,
            found,
        });
    }

    decode(data)
}
