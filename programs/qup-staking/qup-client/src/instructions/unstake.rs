// unstake: [discriminator: 8], returns principal plus unclaimed rewards and
// closes the user stake account

use solana_sdk::instruction::AccountMeta;

use crate::instructions::{EncodedInstruction, OperationKind, StakeAccounts};

pub fn encode_unstake(accounts: &StakeAccounts) -> EncodedInstruction {
    EncodedInstruction {
        kind: OperationKind::Unstake,
        data: OperationKind::Unstake.discriminator().to_vec(),
        accounts: vec![
            AccountMeta::new_readonly(accounts.owner, true),
            AccountMeta::new(accounts.owner_token_account, false),
            AccountMeta::new(accounts.vault_token_account, false),
            AccountMeta::new(accounts.user_stake, false),
            AccountMeta::new(accounts.vault, false),
            AccountMeta::new_readonly(accounts.token_mint, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
    }
}
