// Reward Accrual Engine
//
// Two parallel formulas:
// - APY estimates (f64, DisplayAmount) preview a plan before any stake exists.
// - Accrued rewards (u128 integer math, MinorUnitAmount) use the vault's
//   on-chain basis-point rate once a stake record exists.
// Once a StakeAccountRecord is observed only the accrued view is authoritative.

use crate::amount::{DisplayAmount, MinorUnitAmount};
use crate::constants::{BASIS_POINTS_DENOMINATOR, DAYS_PER_YEAR, SECONDS_PER_DAY};
use crate::errors::{Result, VaultClientError};
use crate::state::{StakeAccountRecord, VaultAccountRecord};

/// Fraction earned per day: `apy / 100 / 365`.
pub fn daily_rate(apy_percent: f64) -> f64 {
    apy_percent / 100.0 / DAYS_PER_YEAR
}

/// Simple-interest reward over `days`: `principal * (apy/100) * (days/365)`.
pub fn projected_reward(principal: DisplayAmount, apy_percent: f64, days: u32) -> DisplayAmount {
    DisplayAmount::new(principal.value() * (apy_percent / 100.0) * (f64::from(days) / DAYS_PER_YEAR))
}

/// Principal plus [`projected_reward`].
pub fn projected_total(principal: DisplayAmount, apy_percent: f64, days: u32) -> DisplayAmount {
    DisplayAmount::new(principal.value() + projected_reward(principal, apy_percent, days).value())
}

/// Whole days between `start_timestamp` and `now_seconds`, never negative.
pub fn days_elapsed(start_timestamp: i64, now_seconds: i64) -> u64 {
    let elapsed = now_seconds.saturating_sub(start_timestamp);
    if elapsed <= 0 {
        return 0;
    }
    (elapsed / SECONDS_PER_DAY) as u64
}

/// Rewards accrued at the on-chain rate: `staked * rate_bps * days / 10_000`,
/// rounded down to whole minor units.
pub fn pending_rewards(
    staked: MinorUnitAmount,
    reward_rate_bps_per_day: u64,
    days_elapsed: u64,
) -> Result<MinorUnitAmount> {
    let accrued = u128::from(staked.get())
        .checked_mul(u128::from(reward_rate_bps_per_day))
        .and_then(|value| value.checked_mul(u128::from(days_elapsed)))
        .ok_or(VaultClientError::ArithmeticOverflow)?
        / BASIS_POINTS_DENOMINATOR;

    u64::try_from(accrued)
        .map(MinorUnitAmount::new)
        .map_err(|_| VaultClientError::ArithmeticOverflow)
}

/// One entry of the vault's reward schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StakingPlan {
    pub duration_days: u32,
    pub apy_percent: f64,
}

/// Pre-stake preview of a plan. Informational only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanQuote {
    pub plan: StakingPlan,
    pub principal: DisplayAmount,
    pub daily_reward: DisplayAmount,
    pub total_reward: DisplayAmount,
    pub projected_total: DisplayAmount,
}

impl StakingPlan {
    pub const fn new(duration_days: u32, apy_percent: f64) -> Self {
        Self {
            duration_days,
            apy_percent,
        }
    }

    pub fn daily_rate(&self) -> f64 {
        daily_rate(self.apy_percent)
    }

    pub fn quote(&self, principal: DisplayAmount) -> PlanQuote {
        PlanQuote {
            plan: *self,
            principal,
            daily_reward: DisplayAmount::new(principal.value() * self.daily_rate()),
            total_reward: projected_reward(principal, self.apy_percent, self.duration_days),
            projected_total: projected_total(principal, self.apy_percent, self.duration_days),
        }
    }
}

/// Post-stake view built from on-chain records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakePosition {
    pub staked: MinorUnitAmount,
    pub recorded_rewards: MinorUnitAmount, // As stored by the program
    pub days_staked: u64,
    pub pending_rewards: MinorUnitAmount,  // At the vault's current rate
    pub reward_rate_bps: u64,
}

impl StakePosition {
    pub fn from_records(
        stake: &StakeAccountRecord,
        vault: &VaultAccountRecord,
        now_seconds: i64,
    ) -> Result<Self> {
        let days_staked = days_elapsed(i64::from(stake.start_time), now_seconds);

        Ok(Self {
            staked: stake.amount,
            recorded_rewards: stake.rewards,
            days_staked,
            pending_rewards: pending_rewards(stake.amount, vault.reward_rate_bps, days_staked)?,
            reward_rate_bps: vault.reward_rate_bps,
        })
    }

    pub fn staked_display(&self, decimals: u8) -> DisplayAmount {
        self.staked.to_display(decimals)
    }

    pub fn recorded_rewards_display(&self, decimals: u8) -> DisplayAmount {
        self.recorded_rewards.to_display(decimals)
    }
}

/// What a caller may show about rewards: an estimate before staking, the
/// accrued position after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RewardView {
    Estimate(PlanQuote),
    Accrued(StakePosition),
}
