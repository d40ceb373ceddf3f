use crate::error::VaultError;
use crate::ledger::Ledger;

/// Checks a ledger snapshot received from a predecessor before it is
/// assigned to a fresh vault.
pub fn incoming_ledger(
    shares: i128,
    deposit_amount: i128,
    want_amount: i128,
    two_asset: bool,
) -> Result<Ledger, VaultError> {
    if !two_asset && want_amount != 0 {
        return Err(VaultError::InvalidAmount);
    }
    let ledger = Ledger {
        deposit_total: deposit_amount,
        shares_total: shares,
        want_total: want_amount,
    };
    if !ledger.is_consistent() {
        return Err(VaultError::InvalidAmount);
    }
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_snapshot() {
        let l = incoming_ledger(400, 420, 4, true).unwrap();
        assert_eq!(l.shares_total, 400);
        assert_eq!(l.deposit_total, 420);
        assert_eq!(l.want_total, 4);
        assert!(incoming_ledger(0, 0, 0, false).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_want_on_single_asset() {
        assert_eq!(
            incoming_ledger(400, 400, 4, false),
            Err(VaultError::InvalidAmount)
        );
    }

    #[test]
    fn test_rejects_unbacked_or_ownerless_values() {
        assert_eq!(incoming_ledger(10, 0, 0, true), Err(VaultError::InvalidAmount));
        assert_eq!(incoming_ledger(0, 10, 0, true), Err(VaultError::InvalidAmount));
        assert_eq!(incoming_ledger(0, 0, 10, true), Err(VaultError::InvalidAmount));
        assert_eq!(incoming_ledger(-1, 10, 0, true), Err(VaultError::InvalidAmount));
    }
}
