// Discriminator Registry
//
// Anchor tags every instruction with the first 8 bytes of
// sha256("global:<instruction_name>") and every account with the first 8
// bytes of sha256("account:<AccountName>"). Selectors are always computed
// here; byte literals belong in test fixtures only.

use sha2::{Digest, Sha256};

use crate::constants::DISCRIMINATOR_LEN;

pub type Discriminator = [u8; DISCRIMINATOR_LEN];

/// Instruction selector for `operation_name`.
pub fn discriminator_for(operation_name: &str) -> Discriminator {
    sighash("global", operation_name)
}

/// Account discriminator for the record type named `account_name`.
pub fn account_discriminator_for(account_name: &str) -> Discriminator {
    sighash("account", account_name)
}

fn sighash(namespace: &str, name: &str) -> Discriminator {
    let preimage = format!("{}:{}", namespace, name);
    let hash = Sha256::digest(preimage.as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    discriminator
}
