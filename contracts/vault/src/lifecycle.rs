use soroban_sdk::contracttype;

use crate::error::VaultError;

/// Whether the vault accepts deposits and harvests.
///
/// `Active <-> Paused`, and both can move to `Retired`, which is terminal.
/// Withdrawals are never gated by the lifecycle.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LifecycleState {
    Active = 0,
    Paused = 1,
    Retired = 2,
}

impl LifecycleState {
    pub fn ensure_active(self) -> Result<(), VaultError> {
        match self {
            LifecycleState::Active => Ok(()),
            _ => Err(VaultError::NotActive),
        }
    }

    /// Used by both `pause` and `panic`.
    pub fn pause(self) -> Result<Self, VaultError> {
        match self {
            LifecycleState::Active => Ok(LifecycleState::Paused),
            _ => Err(VaultError::AlreadyPaused),
        }
    }

    pub fn unpause(self) -> Result<Self, VaultError> {
        match self {
            LifecycleState::Paused => Ok(LifecycleState::Active),
            _ => Err(VaultError::NotPaused),
        }
    }

    pub fn retire(self) -> Result<Self, VaultError> {
        match self {
            LifecycleState::Retired => Err(VaultError::AlreadyRetired),
            _ => Ok(LifecycleState::Retired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LifecycleState::*;
    use super::*;

    #[test]
    fn test_pause_cycle() {
        assert_eq!(Active.pause(), Ok(Paused));
        assert_eq!(Paused.unpause(), Ok(Active));
    }

    #[test]
    fn test_pause_rejects_non_active() {
        assert_eq!(Paused.pause(), Err(VaultError::AlreadyPaused));
        assert_eq!(Retired.pause(), Err(VaultError::AlreadyPaused));
    }

    #[test]
    fn test_unpause_rejects_non_paused() {
        assert_eq!(Active.unpause(), Err(VaultError::NotPaused));
        assert_eq!(Retired.unpause(), Err(VaultError::NotPaused));
    }

    #[test]
    fn test_retire_from_active_or_paused_only_once() {
        assert_eq!(Active.retire(), Ok(Retired));
        assert_eq!(Paused.retire(), Ok(Retired));
        assert_eq!(Retired.retire(), Err(VaultError::AlreadyRetired));
    }

    #[test]
    fn test_only_active_is_active() {
        assert_eq!(Active.ensure_active(), Ok(()));
        assert_eq!(Paused.ensure_active(), Err(VaultError::NotActive));
        assert_eq!(Retired.ensure_active(), Err(VaultError::NotActive));
    }
}
