//! Aggregate share accounting.
//!
//! The vault only knows totals. The orchestrator that owns the vault maps
//! individual users to share counts; the ledger converts between asset
//! amounts and shares using the ratio `deposit_total / shares_total`.
//!
//! All conversions floor, so any rounding dust stays with the vault and
//! is shared by the remaining holders.

use soroban_sdk::contracttype;

use crate::error::VaultError;

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Ledger {
    /// Deposit-asset value attributed to all shares, reinvested yield included.
    pub deposit_total: i128,
    /// Outstanding share units.
    pub shares_total: i128,
    /// Yield-asset balance held for holders of a two-asset vault.
    pub want_total: i128,
}

/// Result of burning shares against the ledger.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub shares: i128,
    pub deposit_amount: i128,
    pub want_amount: i128,
}

/// `amount * numerator / denominator`, floored, with overflow checks.
pub(crate) fn mul_div_floor(
    amount: i128,
    numerator: i128,
    denominator: i128,
) -> Result<i128, VaultError> {
    amount
        .checked_mul(numerator)
        .ok_or(VaultError::MathOverflow)?
        .checked_div(denominator)
        .ok_or(VaultError::MathOverflow)
}

impl Ledger {
    pub fn is_empty(&self) -> bool {
        self.shares_total == 0
    }

    /// Shares minted for `credited` deposit-asset units at the current ratio.
    ///
    /// The first deposit (or one into a ledger with no value behind its
    /// shares) sets a 1:1 rate.
    pub fn shares_for_deposit(&self, credited: i128) -> Result<i128, VaultError> {
        if self.shares_total == 0 || self.deposit_total == 0 {
            return Ok(credited);
        }
        mul_div_floor(credited, self.shares_total, self.deposit_total)
    }

    /// Credits a deposit and returns the shares minted for it.
    pub fn deposit(&mut self, credited: i128) -> Result<i128, VaultError> {
        if credited <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let shares = self.shares_for_deposit(credited)?;
        if shares == 0 {
            return Err(VaultError::InvalidAmount);
        }

        self.deposit_total = self
            .deposit_total
            .checked_add(credited)
            .ok_or(VaultError::MathOverflow)?;
        self.shares_total = self
            .shares_total
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        Ok(shares)
    }

    /// Burns the shares worth `amount` deposit-asset units.
    ///
    /// Requests above `deposit_total` are clamped to it. The deposit and want
    /// amounts paid out are recomputed from the burned shares, so a holder can
    /// never receive more than their proportional part.
    pub fn withdraw(&mut self, amount: i128) -> Result<Withdrawal, VaultError> {
        if amount <= 0 || self.deposit_total == 0 {
            return Err(VaultError::InvalidAmount);
        }
        let amount = amount.min(self.deposit_total);

        let shares = mul_div_floor(amount, self.shares_total, self.deposit_total)?;
        if shares == 0 {
            return Err(VaultError::InvalidAmount);
        }
        let deposit_amount = mul_div_floor(shares, self.deposit_total, self.shares_total)?;
        let want_amount = mul_div_floor(shares, self.want_total, self.shares_total)?;

        self.deposit_total -= deposit_amount;
        self.shares_total -= shares;
        self.want_total -= want_amount;

        Ok(Withdrawal {
            shares,
            deposit_amount,
            want_amount,
        })
    }

    /// Adds reinvested yield to the deposit side. Shares are unchanged, so the
    /// value of every share grows.
    pub fn compound(&mut self, amount: i128) -> Result<(), VaultError> {
        self.deposit_total = self
            .deposit_total
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    /// Adds harvested yield to the separately tracked want balance.
    pub fn accrue_want(&mut self, amount: i128) -> Result<(), VaultError> {
        self.want_total = self
            .want_total
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    /// Empty shares carry no value, and value never sits behind zero shares.
    pub fn is_consistent(&self) -> bool {
        let non_negative = self.deposit_total >= 0 && self.shares_total >= 0 && self.want_total >= 0;
        let paired = (self.shares_total == 0) == (self.deposit_total == 0);
        let want_owned = self.shares_total != 0 || self.want_total == 0;
        non_negative && paired && want_owned
    }

    /// Hands the whole ledger out and leaves this one at zero.
    pub fn take(&mut self) -> Ledger {
        core::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(deposit_total: i128, shares_total: i128, want_total: i128) -> Ledger {
        Ledger {
            deposit_total,
            shares_total,
            want_total,
        }
    }

    #[test]
    fn test_first_deposit_is_one_to_one() {
        let mut l = Ledger::default();
        assert_eq!(l.deposit(100).unwrap(), 100);
        assert_eq!(l, ledger(100, 100, 0));
    }

    #[test]
    fn test_deposit_uses_pre_deposit_ratio() {
        // 2 assets per share after compounding
        let mut l = ledger(2000, 1000, 0);
        assert_eq!(l.deposit(500).unwrap(), 250);
        assert_eq!(l, ledger(2500, 1250, 0));
    }

    #[test]
    fn test_deposit_rounds_down() {
        let mut l = ledger(1000, 333, 0);
        // 100 * 333 / 1000 = 33.3
        assert_eq!(l.deposit(100).unwrap(), 33);
    }

    #[test]
    fn test_deposit_rejects_zero_and_dust() {
        let mut l = ledger(1_000_000, 1, 0);
        assert_eq!(l.deposit(0), Err(VaultError::InvalidAmount));
        assert_eq!(l.deposit(10), Err(VaultError::InvalidAmount));
        assert_eq!(l, ledger(1_000_000, 1, 0));
    }

    #[test]
    fn test_withdraw_two_asset_proportional() {
        let mut l = ledger(500, 500, 5);
        let w = l.withdraw(100).unwrap();
        assert_eq!(
            w,
            Withdrawal {
                shares: 100,
                deposit_amount: 100,
                want_amount: 1
            }
        );
        assert_eq!(l, ledger(400, 400, 4));
    }

    #[test]
    fn test_withdraw_round_trip_loses_at_most_one_unit() {
        let mut l = ledger(1000, 700, 0);
        let shares = l.deposit(333).unwrap();
        let w = l.withdraw(333).unwrap();
        assert!(w.shares <= shares);
        assert!(333 - w.deposit_amount <= 1);
        assert!(l.is_consistent());
    }

    #[test]
    fn test_withdraw_clamps_to_deposit_total() {
        let mut l = ledger(505, 500, 3);
        let w = l.withdraw(10_000).unwrap();
        assert_eq!(w.shares, 500);
        assert_eq!(w.deposit_amount, 505);
        assert_eq!(w.want_amount, 3);
        assert_eq!(l, Ledger::default());
    }

    #[test]
    fn test_withdraw_from_empty_ledger() {
        let mut l = Ledger::default();
        assert_eq!(l.withdraw(1), Err(VaultError::InvalidAmount));
        assert_eq!(l.withdraw(0), Err(VaultError::InvalidAmount));
    }

    #[test]
    fn test_compound_keeps_shares() {
        let mut l = ledger(500, 500, 0);
        l.compound(5).unwrap();
        assert_eq!(l, ledger(505, 500, 0));
        // the next depositor pays the new price
        assert_eq!(l.shares_for_deposit(101).unwrap(), 100);
    }

    #[test]
    fn test_overflow_is_reported() {
        let l = ledger(1, i128::MAX, 0);
        assert_eq!(l.shares_for_deposit(2), Err(VaultError::MathOverflow));
    }

    #[test]
    fn test_take_zeroes_source() {
        let mut l = ledger(400, 400, 4);
        let snapshot = l.take();
        assert_eq!(snapshot, ledger(400, 400, 4));
        assert_eq!(l, Ledger::default());
    }

    #[test]
    fn test_consistency() {
        assert!(Ledger::default().is_consistent());
        assert!(ledger(10, 10, 0).is_consistent());
        assert!(!ledger(10, 0, 0).is_consistent());
        assert!(!ledger(0, 10, 0).is_consistent());
        assert!(!ledger(0, 0, 1).is_consistent());
    }
}
