// User stake account record
//
// Layout: [discriminator: 8][amount: u64 @8][rewards: u64 @16][start_time: u32 @24]

use borsh::{BorshDeserialize, BorshSerialize};

use crate::amount::MinorUnitAmount;
use crate::constants::{DISCRIMINATOR_LEN, USER_STAKE_ACCOUNT_NAME};
use crate::errors::Result;
use crate::state::AccountRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeAccountRecord {
    pub amount: MinorUnitAmount,   // Staked principal
    pub rewards: MinorUnitAmount,  // Accumulated, unclaimed rewards
    pub start_time: u32,           // Unix seconds
}

#[derive(BorshSerialize, BorshDeserialize)]
struct StakeAccountLayout {
    amount: u64,
    rewards: u64,
    start_time: u32,
}

impl AccountRecord for StakeAccountRecord {
    const ACCOUNT_NAME: &'static str = USER_STAKE_ACCOUNT_NAME;
    const LEN: usize = DISCRIMINATOR_LEN + 8 + 8 + 4;

    fn decode_fields(data: &[u8]) -> Result<Self> {
        let mut fields = &data[DISCRIMINATOR_LEN..];
        let layout = StakeAccountLayout::deserialize(&mut fields)?;

        Ok(Self {
            amount: MinorUnitAmount::new(layout.amount),
            rewards: MinorUnitAmount::new(layout.rewards),
            start_time: layout.start_time,
        })
    }
}

impl StakeAccountRecord {
    /// Serialize into account bytes, discriminator first.
    pub fn to_account_data(&self) -> Result<Vec<u8>> {
        let layout = StakeAccountLayout {
            amount: self.amount.get(),
            rewards: self.rewards.get(),
            start_time: self.start_time,
        };

        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::discriminator());
        layout.serialize(&mut data)?;
        Ok(data)
    }
}
