use soroban_sdk::contracterror;

/// Errors returned by the vault.
///
/// Every error aborts the whole invocation, so a rejected call leaves the
/// ledger, the lifecycle state and all token balances exactly as they were.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    /// Zero, negative or dust amount (would mint or burn no shares).
    InvalidAmount = 1,
    /// Target address is not usable (the vault itself).
    InvalidAddress = 2,
    /// Caller does not hold the required role.
    Unauthorized = 3,
    /// Deposit or harvest attempted while Paused or Retired.
    NotActive = 4,
    /// Pause or panic requested while not Active.
    AlreadyPaused = 5,
    /// Unpause requested while not Paused.
    NotPaused = 6,
    /// Recovery of the deposit, want, reward or yield asset.
    UnsafeRecovery = 7,
    /// Fee or slippage configuration outside its bounds.
    SettingsOutOfBounds = 8,
    /// Swap adapter failed or returned less than the slippage floor.
    SlippageExceeded = 9,
    /// Retire or migration requested on a Retired vault.
    AlreadyRetired = 10,
    AlreadyInitialized = 11,
    NotInitialized = 12,
    MathOverflow = 13,
    /// Swap path does not connect the yield asset to its target.
    InvalidPath = 14,
    /// Migration preconditions do not hold on one side of the handshake.
    MigrationConflict = 15,
    /// Farm sent back less principal than was recalled.
    FarmShortfall = 16,
}
