use soroban_sdk::contracttype;

use crate::error::VaultError;
use crate::ledger::mul_div_floor;

/// Denominator for entrance fee, performance fee and slippage.
pub const BPS_DENOMINATOR: u32 = 10_000;
/// Denominator for the rewards/treasury split of the performance fee.
pub const FACTOR_DENOMINATOR: u32 = 1_000;

/// Entrance fee must stay strictly above this (at most 1% kept on entry).
pub const ENTRANCE_FEE_LL: u32 = 9_900;
pub const PERFORMANCE_FEE_UL: u32 = 800;
pub const SLIPPAGE_UL: u32 = 900;

/// Fee configuration of one vault, written only through `set_settings`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSettings {
    /// Part of a deposit credited to the ledger, in bps. 10000 means no fee.
    pub entrance_fee: u32,
    /// Part of harvested yield taken as protocol fee, in bps.
    pub performance_fee: u32,
    /// Rewards sink share of the performance fee, per mille.
    pub rewards_fee_factor: u32,
    /// Treasury sink share of the performance fee, per mille.
    pub treasury_fee_factor: u32,
    /// Maximum accepted shortfall against the router quote, in bps.
    pub slippage: u32,
}

impl Default for FeeSettings {
    fn default() -> Self {
        FeeSettings {
            entrance_fee: BPS_DENOMINATOR,
            performance_fee: 300,
            rewards_fee_factor: 700,
            treasury_fee_factor: 300,
            slippage: 100,
        }
    }
}

/// How a harvest is divided before any swap.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PerformanceSplit {
    pub fee: i128,
    pub reinvest: i128,
}

/// How the swapped performance fee is paid out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeDistribution {
    pub to_rewards: i128,
    pub to_treasury: i128,
}

impl FeeSettings {
    pub fn validate(&self) -> Result<(), VaultError> {
        let entrance_ok =
            self.entrance_fee > ENTRANCE_FEE_LL && self.entrance_fee <= BPS_DENOMINATOR;
        let performance_ok = self.performance_fee <= PERFORMANCE_FEE_UL;
        let factors_ok = self
            .rewards_fee_factor
            .checked_add(self.treasury_fee_factor)
            .map_or(false, |sum| sum == FACTOR_DENOMINATOR);
        let slippage_ok = self.slippage <= SLIPPAGE_UL;

        if entrance_ok && performance_ok && factors_ok && slippage_ok {
            Ok(())
        } else {
            Err(VaultError::SettingsOutOfBounds)
        }
    }

    /// Returns `(credited, fee)` for a raw deposit amount.
    pub fn apply_entrance_fee(&self, amount: i128) -> Result<(i128, i128), VaultError> {
        let credited = mul_div_floor(
            amount,
            self.entrance_fee as i128,
            BPS_DENOMINATOR as i128,
        )?;
        Ok((credited, amount - credited))
    }

    pub fn split_harvest(&self, harvested: i128) -> Result<PerformanceSplit, VaultError> {
        let fee = mul_div_floor(
            harvested,
            self.performance_fee as i128,
            BPS_DENOMINATOR as i128,
        )?;
        Ok(PerformanceSplit {
            fee,
            reinvest: harvested - fee,
        })
    }

    /// Rewards get their floored share; the remainder goes to the treasury so
    /// the two parts always add up to `swapped_fee`.
    pub fn distribute(&self, swapped_fee: i128) -> Result<FeeDistribution, VaultError> {
        let to_rewards = mul_div_floor(
            swapped_fee,
            self.rewards_fee_factor as i128,
            FACTOR_DENOMINATOR as i128,
        )?;
        Ok(FeeDistribution {
            to_rewards,
            to_treasury: swapped_fee - to_rewards,
        })
    }

    /// Lowest acceptable output for a swap quoted at `quoted`.
    pub fn min_amount_out(&self, quoted: i128) -> Result<i128, VaultError> {
        mul_div_floor(
            quoted,
            (BPS_DENOMINATOR - self.slippage) as i128,
            BPS_DENOMINATOR as i128,
        )
    }
}
