//! # Compounding Vault Contract
//!
//! A yield-bearing vault that accepts deposits of one fungible asset, tracks
//! proportional ownership through internal share units, periodically harvests
//! yield from an external farm, takes protocol fees and reinvests the rest.
//!
//! ## Architecture Overview
//!
//! The vault is owned by an orchestrator contract that calls `deposit` and
//! `withdraw` on behalf of end users and keeps the per-user share mapping
//! itself. The vault only tracks aggregates:
//!
//! - `deposit_total`: deposit-asset value behind all shares
//! - `shares_total`: outstanding share units
//! - `want_total`: yield-asset balance held for holders (two-asset vaults)
//!
//! ## Share Accounting Model
//!
//! - First deposit: 1 credited unit = 1 share
//! - Later deposits: `shares = credited * shares_total / deposit_total`,
//!   evaluated before the deposit is added
//! - Withdrawals take an amount in deposit-asset units and burn the matching
//!   shares; payouts are recomputed from the burned shares
//!
//! Every conversion floors, leaving rounding dust in the vault.
//!
//! ## Vault Variants
//!
//! - **Single-asset**: harvested yield is swapped back into the deposit asset
//!   and redeployed into the farm, growing `deposit_total` (self-compounding).
//! - **Two-asset**: `want_token` is configured; harvested yield is swapped into
//!   it and held by the vault, growing `want_total`. Withdrawals pay a
//!   proportional slice of both balances.
//!
//! ## Asset Flow
//!
//! ```text
//! Deposit Flow:
//! Orchestrator → [Vault.deposit()] → user's asset → [Vault] → [Farm]
//!                                                  ↓
//!                                      entrance fee → treasury
//!
//! Harvest Flow (harvester or governance):
//! [Farm.claim()] → yield → performance fee → [Router] → reward asset
//!                    ↓                                     ↓
//!               reinvestment → [Router]          rewards sink / treasury
//!                    ↓
//!      single-asset: [Farm] (deposit_total grows)
//!      two-asset:    vault custody (want_total grows)
//!
//! Migration Flow (owner):
//! [Old.upgrade_to(new)] → retire, snapshot recorded as pending handoff
//! [New.upgrade_from(old, snapshot)] → match handoff
//!        → [Old.release_to_successor()] → funds → [New] → assign ledger, deploy
//! ```
//!
//! ## Roles
//!
//! - `owner`: the orchestrator. Deposit, withdraw, lifecycle, migration.
//! - `governance`: fee settings, swap paths, harvester whitelist, stuck-asset
//!   recovery, handing governance over.
//! - harvesters: whitelisted addresses allowed to call `harvest`.
//!
//! Each gated function takes the caller address, requires its authorization
//! and compares it with the stored role, returning `VaultError::Unauthorized`
//! on mismatch.
//!
//! ## Storage Layout
//!
//! ### Instance Storage
//! - `Config`: token, farm, router and sink addresses
//! - `Owner`, `Governance`: role holders
//! - `Settings`: fee configuration
//! - `Paths`: router paths used by harvest
//! - `Ledger`: aggregate share accounting
//! - `Deployed`: principal currently held by the farm
//! - `State`: lifecycle state
//! - `Successor`: vault the ledger was migrated to
//! - `Handoff`: migrated snapshot not yet released to the successor
//!
//! ### Persistent Storage
//! - `Harvester(address)`: harvester whitelist entries
//!
//! # Examples
//!
//! ```ignore
//! let shares = vault_client.deposit(&orchestrator, &user, &amount);
//! let (harvested, to_rewards, to_treasury) = vault_client.harvest(&harvester);
//! let (shares, deposit_amount, want_amount) = vault_client.withdraw(&orchestrator, &user, &amount);
//! ```

#![no_std]

use soroban_sdk::{contract, contractimpl, log, token, Address, Env};

pub mod adapters;
pub mod error;
pub mod events;
pub mod fees;
pub mod ledger;
pub mod lifecycle;
pub mod migration;
mod storage;

#[cfg(test)]
mod mock;

pub use crate::adapters::{FarmClient, SwapClient};
pub use crate::error::VaultError;
pub use crate::fees::FeeSettings;
pub use crate::ledger::Ledger;
pub use crate::lifecycle::LifecycleState;
pub use crate::storage::{SwapPaths, VaultConfig};

use crate::events::{
    DepositEvent, FeesEvent, HarvestEvent, InitializedEvent, MigrationEvent, RecoverEvent,
    WithdrawEvent,
};

/// Compounding Vault - share-accounted yield vault driven by an orchestrator.
///
/// # Security Model
///
/// - Only the owner moves user funds in or out, and only the owner drives the
///   lifecycle and migration
/// - Only governance changes fees, paths and roles
/// - Harvest can only be triggered by a whitelisted harvester or governance
/// - Withdrawals are never blocked by the lifecycle state
/// - Deposit, want, reward and yield assets can never be "recovered"
#[contract]
pub struct CompoundingVault;

#[contractimpl]
impl CompoundingVault {
    // ==========================================================================
    // INITIALIZATION
    // ==========================================================================

    /// Initializes the vault with its roles, wiring and swap paths.
    ///
    /// Fee settings start at [`FeeSettings::default`], the ledger at zero and
    /// the lifecycle at `Active`.
    ///
    /// # Arguments
    /// * `owner` - The orchestrator allowed to deposit, withdraw and migrate
    /// * `governance` - The address allowed to change settings and roles
    /// * `config` - Token, farm, router and fee sink addresses
    /// * `paths` - Router paths from the farm's yield asset to the reward
    ///   asset and to the compounding asset
    ///
    /// # Errors
    /// - `AlreadyInitialized` if called a second time
    /// - `InvalidPath` if a path does not connect its assets
    ///
    /// # Events
    /// Emits `init` with `InitializedEvent`.
    pub fn initialize(
        env: Env,
        owner: Address,
        governance: Address,
        config: VaultConfig,
        paths: SwapPaths,
    ) -> Result<(), VaultError> {
        if storage::is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }
        Self::check_paths(&config, &paths)?;

        storage::set_config(&env, &config);
        storage::set_owner(&env, &owner);
        storage::set_governance(&env, &governance);
        storage::set_settings(&env, &FeeSettings::default());
        storage::set_paths(&env, &paths);
        storage::set_ledger(&env, &Ledger::default());
        storage::set_deployed(&env, 0);
        storage::set_state(&env, LifecycleState::Active);
        storage::bump_instance(&env);

        events::initialized(
            &env,
            InitializedEvent {
                owner,
                governance,
                deposit_token: config.deposit_token.clone(),
                two_asset: config.want_token.is_some(),
            },
        );
        Ok(())
    }

    // ==========================================================================
    // LEDGER - DEPOSIT
    // ==========================================================================

    /// Deposits `amount` of the deposit asset pulled from `from`.
    ///
    /// The entrance fee is taken first and sent to the treasury; shares are
    /// minted for the credited remainder at the pre-deposit ratio, and the
    /// credited amount is deployed into the farm.
    ///
    /// # Arguments
    /// * `caller` - Must be the owner (orchestrator)
    /// * `from` - The user whose asset is pulled (must authorize)
    /// * `amount` - Raw deposit amount
    ///
    /// # Returns
    /// Shares minted, to be credited to the user by the orchestrator.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `InvalidAmount` if `amount` is not positive or would mint no shares
    /// - `NotActive` if the vault is Paused or Retired
    ///
    /// # Events
    /// Emits `deposit` with `DepositEvent`.
    pub fn deposit(env: Env, caller: Address, from: Address, amount: i128) -> Result<i128, VaultError> {
        Self::require_owner(&env, &caller)?;
        if from != caller {
            from.require_auth();
        }
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        storage::get_state(&env)?.ensure_active()?;

        let config = storage::get_config(&env)?;
        let settings = storage::get_settings(&env)?;
        let (credited, fee) = settings.apply_entrance_fee(amount)?;

        let mut ledger = storage::get_ledger(&env);
        let shares = ledger.deposit(credited)?;

        let vault = env.current_contract_address();
        let deposit_token = token::Client::new(&env, &config.deposit_token);
        deposit_token.transfer(&from, &vault, &amount);
        if fee > 0 {
            deposit_token.transfer(&vault, &config.treasury, &fee);
        }
        adapters::deploy(&env, &config, credited)?;

        storage::set_ledger(&env, &ledger);
        storage::bump_instance(&env);

        events::deposited(
            &env,
            DepositEvent {
                from,
                amount,
                credited,
                shares,
                deposit_total: ledger.deposit_total,
                shares_total: ledger.shares_total,
            },
        );
        Ok(shares)
    }

    // ==========================================================================
    // LEDGER - WITHDRAW
    // ==========================================================================

    /// Redeems `amount` deposit-asset units worth of shares and pays `to`.
    ///
    /// Not gated by the lifecycle: depositors can always exit. Principal is
    /// recalled from the farm when it is deployed and paid from vault custody
    /// otherwise (after `panic` or `retire`). Requests above `deposit_total`
    /// are clamped to it.
    ///
    /// # Arguments
    /// * `caller` - Must be the owner (orchestrator)
    /// * `to` - Receiver of the deposit asset and, on two-asset vaults, of the
    ///   want asset
    /// * `amount` - Value to redeem, in deposit-asset units
    ///
    /// # Returns
    /// `(shares, deposit_amount, want_amount)`: shares burned and amounts paid.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `InvalidAmount` if `amount` is not positive, the ledger is empty or
    ///   the request is worth less than one share
    /// - `FarmShortfall` if the farm returns less principal than recalled
    ///
    /// # Events
    /// Emits `withdraw` with `WithdrawEvent`.
    pub fn withdraw(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<(i128, i128, i128), VaultError> {
        Self::require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let config = storage::get_config(&env)?;
        let mut ledger = storage::get_ledger(&env);
        let withdrawal = ledger.withdraw(amount)?;

        adapters::recall(&env, &config, withdrawal.deposit_amount)?;

        let vault = env.current_contract_address();
        token::Client::new(&env, &config.deposit_token).transfer(
            &vault,
            &to,
            &withdrawal.deposit_amount,
        );
        if withdrawal.want_amount > 0 {
            if let Some(want_token) = &config.want_token {
                token::Client::new(&env, want_token).transfer(&vault, &to, &withdrawal.want_amount);
            }
        }

        storage::set_ledger(&env, &ledger);
        storage::bump_instance(&env);

        events::withdrawn(
            &env,
            WithdrawEvent {
                to,
                shares: withdrawal.shares,
                deposit_amount: withdrawal.deposit_amount,
                want_amount: withdrawal.want_amount,
                deposit_total: ledger.deposit_total,
                shares_total: ledger.shares_total,
            },
        );
        Ok((
            withdrawal.shares,
            withdrawal.deposit_amount,
            withdrawal.want_amount,
        ))
    }

    // ==========================================================================
    // HARVEST
    // ==========================================================================

    /// Claims farm yield, pays the performance fee and compounds the rest.
    ///
    /// The fee part is swapped into the reward asset and split between the
    /// rewards sink and the treasury (the treasury receives the rounding
    /// remainder). The rest is swapped into the compounding asset: redeployed
    /// into the farm on single-asset vaults, held as `want_total` on two-asset
    /// vaults. Every swap is bounded by the configured slippage.
    ///
    /// With no outstanding shares the yield is left unclaimed.
    ///
    /// # Arguments
    /// * `caller` - A whitelisted harvester or governance
    ///
    /// # Returns
    /// `(harvested, to_rewards, to_treasury)`.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is neither harvester nor governance
    /// - `NotActive` if the vault is Paused or Retired
    /// - `SlippageExceeded` if any swap fails or undershoots its floor
    ///
    /// # Events
    /// Emits `harvest` with `HarvestEvent` and `fees` with `FeesEvent`.
    pub fn harvest(env: Env, caller: Address) -> Result<(i128, i128, i128), VaultError> {
        Self::require_harvester(&env, &caller)?;
        storage::get_state(&env)?.ensure_active()?;

        let mut ledger = storage::get_ledger(&env);
        if ledger.is_empty() {
            log!(&env, "harvest skipped: no outstanding shares");
            return Ok((0, 0, 0));
        }

        let config = storage::get_config(&env)?;
        let settings = storage::get_settings(&env)?;
        let paths = storage::get_paths(&env)?;

        let harvested = FarmClient::new(&env, &config.farm).claim();
        if harvested <= 0 {
            return Ok((0, 0, 0));
        }
        let split = settings.split_harvest(harvested)?;

        let swapped_fee = adapters::swap(&env, &config, &settings, &paths.earned_to_reward, split.fee)?;
        let distribution = settings.distribute(swapped_fee)?;
        let vault = env.current_contract_address();
        let reward_token = token::Client::new(&env, &config.reward_token);
        if distribution.to_rewards > 0 {
            reward_token.transfer(&vault, &config.rewards, &distribution.to_rewards);
        }
        if distribution.to_treasury > 0 {
            reward_token.transfer(&vault, &config.treasury, &distribution.to_treasury);
        }

        let compounded = adapters::swap(&env, &config, &settings, &paths.earned_to_want, split.reinvest)?;
        if config.want_token.is_some() {
            ledger.accrue_want(compounded)?;
        } else {
            adapters::deploy(&env, &config, compounded)?;
            ledger.compound(compounded)?;
        }

        storage::set_ledger(&env, &ledger);
        storage::bump_instance(&env);

        events::harvested(
            &env,
            HarvestEvent {
                harvested,
                compounded,
                deposit_total: ledger.deposit_total,
                want_total: ledger.want_total,
            },
        );
        events::fees_distributed(
            &env,
            FeesEvent {
                to_rewards: distribution.to_rewards,
                to_treasury: distribution.to_treasury,
            },
        );
        Ok((harvested, distribution.to_rewards, distribution.to_treasury))
    }

    /// Returns the farm's claimable, unharvested yield.
    pub fn pending_yield(env: Env) -> Result<i128, VaultError> {
        let config = storage::get_config(&env)?;
        Ok(FarmClient::new(&env, &config.farm).claimable_yield())
    }

    // ==========================================================================
    // LIFECYCLE
    // ==========================================================================

    /// Pauses deposits and harvests. Funds stay where they are.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `AlreadyPaused` if the vault is not Active
    pub fn pause(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;
        let next = storage::get_state(&env)?.pause()?;
        storage::set_state(&env, next);
        storage::bump_instance(&env);
        events::paused(&env, 0);
        Ok(())
    }

    /// Re-activates a paused vault and redeploys principal held in custody.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `NotPaused` if the vault is not Paused
    pub fn unpause(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;
        let next = storage::get_state(&env)?.unpause()?;

        let config = storage::get_config(&env)?;
        let in_custody = storage::get_ledger(&env).deposit_total - storage::get_deployed(&env);
        adapters::deploy(&env, &config, in_custody)?;

        storage::set_state(&env, next);
        storage::bump_instance(&env);
        events::unpaused(&env, in_custody.max(0));
        Ok(())
    }

    /// Emergency stop: recalls all principal from the farm and pauses.
    ///
    /// The ledger is untouched; only custody of the funds moves.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `AlreadyPaused` if the vault is not Active
    ///
    /// # Events
    /// Emits `panic` with the recalled principal.
    pub fn panic(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;
        let next = storage::get_state(&env)?.pause()?;

        let config = storage::get_config(&env)?;
        let recalled = adapters::recall_all(&env, &config);
        log!(&env, "emergency recall", recalled);

        storage::set_state(&env, next);
        storage::bump_instance(&env);
        events::panicked(&env, recalled);
        Ok(())
    }

    /// Recalls all principal and retires the vault for good.
    ///
    /// Valid from Active and Paused. Deposits and harvests are blocked
    /// afterwards; withdrawals are paid from vault custody.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `AlreadyRetired` if the vault is already Retired
    pub fn retire(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;
        let recalled = Self::retire_and_recall(&env)?;
        storage::bump_instance(&env);
        events::retired(&env, recalled);
        Ok(())
    }

    // ==========================================================================
    // MIGRATION
    // ==========================================================================

    /// Hands the whole ledger to `successor`.
    ///
    /// Retires the vault (recalling deployed principal) unless it is already
    /// Retired, zeroes the ledger and records the snapshot as a pending
    /// handoff. The funds stay in vault custody until `successor` claims them
    /// through `release_to_successor` during its `upgrade_from`. The handoff
    /// does not expire.
    ///
    /// # Returns
    /// The snapshot `(shares, deposit_amount, want_amount)` to pass to the
    /// successor's `upgrade_from`.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `InvalidAddress` if `successor` is this vault
    /// - `MigrationConflict` if the ledger was already handed over
    ///
    /// # Events
    /// Emits `upgr_to` with `MigrationEvent`.
    pub fn upgrade_to(
        env: Env,
        caller: Address,
        successor: Address,
    ) -> Result<(i128, i128, i128), VaultError> {
        Self::require_owner(&env, &caller)?;
        if successor == env.current_contract_address() {
            return Err(VaultError::InvalidAddress);
        }
        if storage::get_successor(&env).is_some() {
            return Err(VaultError::MigrationConflict);
        }

        if storage::get_state(&env)? != LifecycleState::Retired {
            let recalled = Self::retire_and_recall(&env)?;
            events::retired(&env, recalled);
        }

        let mut ledger = storage::get_ledger(&env);
        let snapshot = ledger.take();
        storage::set_ledger(&env, &ledger);
        storage::set_handoff(&env, &snapshot);
        storage::set_successor(&env, &successor);
        storage::bump_instance(&env);
        log!(&env, "ledger handed over", snapshot.shares_total);

        events::upgraded_to(
            &env,
            MigrationEvent {
                counterpart: successor,
                shares: snapshot.shares_total,
                deposit_amount: snapshot.deposit_total,
                want_amount: snapshot.want_total,
            },
        );
        Ok((
            snapshot.shares_total,
            snapshot.deposit_total,
            snapshot.want_total,
        ))
    }

    /// Sends the funds behind the pending handoff to the recorded successor.
    ///
    /// Called by the successor vault from its `upgrade_from`. The handoff is
    /// cleared, so the funds move exactly once.
    ///
    /// # Returns
    /// The released snapshot.
    ///
    /// # Errors
    /// - `MigrationConflict` if no successor is recorded or the handoff was
    ///   already released
    ///
    /// # Events
    /// Emits `released` with `MigrationEvent`.
    pub fn release_to_successor(env: Env) -> Result<Ledger, VaultError> {
        let successor = storage::get_successor(&env).ok_or(VaultError::MigrationConflict)?;
        successor.require_auth();
        let snapshot = storage::get_handoff(&env).ok_or(VaultError::MigrationConflict)?;
        storage::remove_handoff(&env);

        let config = storage::get_config(&env)?;
        let vault = env.current_contract_address();
        if snapshot.deposit_total > 0 {
            token::Client::new(&env, &config.deposit_token).transfer(
                &vault,
                &successor,
                &snapshot.deposit_total,
            );
        }
        if snapshot.want_total > 0 {
            if let Some(want_token) = &config.want_token {
                token::Client::new(&env, want_token).transfer(
                    &vault,
                    &successor,
                    &snapshot.want_total,
                );
            }
        }
        storage::bump_instance(&env);

        events::released(
            &env,
            MigrationEvent {
                counterpart: successor,
                shares: snapshot.shares_total,
                deposit_amount: snapshot.deposit_total,
                want_amount: snapshot.want_total,
            },
        );
        Ok(snapshot)
    }

    /// Takes over the ledger snapshot produced by `predecessor.upgrade_to`.
    ///
    /// This vault must be fresh (Active, empty ledger, nothing deployed),
    /// `predecessor` must have recorded this vault as its successor, and the
    /// arguments must equal the predecessor's pending handoff. The funds are
    /// then released by the predecessor, the received balances are checked
    /// against the snapshot, and the ledger is assigned (not added to) before
    /// the principal is deployed.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `InvalidAddress` if `predecessor` is this vault
    /// - `NotActive` if this vault is Paused or Retired
    /// - `InvalidAmount` if the snapshot is inconsistent
    /// - `MigrationConflict` if this vault is not fresh, the predecessor did
    ///   not name it, the arguments differ from its handoff, or the received
    ///   amounts differ from the snapshot
    ///
    /// # Events
    /// Emits `upgr_from` with `MigrationEvent`.
    pub fn upgrade_from(
        env: Env,
        caller: Address,
        predecessor: Address,
        shares: i128,
        deposit_amount: i128,
        want_amount: i128,
    ) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;
        let vault = env.current_contract_address();
        if predecessor == vault {
            return Err(VaultError::InvalidAddress);
        }
        storage::get_state(&env)?.ensure_active()?;
        if !storage::get_ledger(&env).is_empty() || storage::get_deployed(&env) != 0 {
            return Err(VaultError::MigrationConflict);
        }

        let config = storage::get_config(&env)?;
        let incoming = migration::incoming_ledger(
            shares,
            deposit_amount,
            want_amount,
            config.want_token.is_some(),
        )?;

        let predecessor_client = CompoundingVaultClient::new(&env, &predecessor);
        let named_successor = match predecessor_client.try_successor() {
            Ok(Ok(successor)) => successor,
            _ => None,
        };
        if named_successor != Some(vault.clone()) {
            return Err(VaultError::MigrationConflict);
        }
        let handoff = match predecessor_client.try_handoff() {
            Ok(Ok(handoff)) => handoff,
            _ => None,
        };
        if handoff.as_ref() != Some(&incoming) {
            return Err(VaultError::MigrationConflict);
        }

        let deposit_token = token::Client::new(&env, &config.deposit_token);
        let want_token = config.want_token.as_ref().map(|want| token::Client::new(&env, want));
        let deposit_before = deposit_token.balance(&vault);
        let want_before = want_token.as_ref().map_or(0, |want| want.balance(&vault));

        let released = match predecessor_client.try_release_to_successor() {
            Ok(Ok(released)) => released,
            _ => return Err(VaultError::MigrationConflict),
        };
        let deposit_received = deposit_token.balance(&vault) - deposit_before;
        let want_received = want_token.as_ref().map_or(0, |want| want.balance(&vault)) - want_before;
        if released != incoming
            || deposit_received != deposit_amount
            || want_received != want_amount
        {
            return Err(VaultError::MigrationConflict);
        }

        storage::set_ledger(&env, &incoming);
        adapters::deploy(&env, &config, deposit_amount)?;
        storage::bump_instance(&env);

        events::upgraded_from(
            &env,
            MigrationEvent {
                counterpart: predecessor,
                shares,
                deposit_amount,
                want_amount,
            },
        );
        Ok(())
    }

    // ==========================================================================
    // GOVERNANCE
    // ==========================================================================

    /// Replaces the fee settings.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not governance
    /// - `SettingsOutOfBounds` unless `9900 < entrance_fee <= 10000`,
    ///   `performance_fee <= 800`, the two factors sum to 1000 and
    ///   `slippage <= 900`
    pub fn set_settings(
        env: Env,
        caller: Address,
        entrance_fee: u32,
        performance_fee: u32,
        rewards_fee_factor: u32,
        treasury_fee_factor: u32,
        slippage: u32,
    ) -> Result<(), VaultError> {
        Self::require_governance(&env, &caller)?;
        let settings = FeeSettings {
            entrance_fee,
            performance_fee,
            rewards_fee_factor,
            treasury_fee_factor,
            slippage,
        };
        settings.validate()?;

        storage::set_settings(&env, &settings);
        storage::bump_instance(&env);
        events::settings_updated(&env, settings);
        Ok(())
    }

    /// Replaces the router paths used by harvest.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not governance
    /// - `InvalidPath` if a path does not connect its assets
    pub fn set_swap_paths(env: Env, caller: Address, paths: SwapPaths) -> Result<(), VaultError> {
        Self::require_governance(&env, &caller)?;
        let config = storage::get_config(&env)?;
        Self::check_paths(&config, &paths)?;

        storage::set_paths(&env, &paths);
        storage::bump_instance(&env);
        events::paths_updated(&env);
        Ok(())
    }

    /// Whitelists `harvester` for `harvest`.
    ///
    /// # Arguments
    /// * `caller` - Must be governance
    /// * `harvester` - Address allowed to trigger harvests
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not governance
    ///
    /// # Events
    /// Emits `harv_add` with the harvester address.
    pub fn add_harvester(env: Env, caller: Address, harvester: Address) -> Result<(), VaultError> {
        Self::require_governance(&env, &caller)?;
        storage::add_harvester(&env, &harvester);
        events::harvester_added(&env, harvester);
        Ok(())
    }

    /// Removes `harvester` from the whitelist. Removing an unlisted address
    /// is a no-op.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not governance
    ///
    /// # Events
    /// Emits `harv_rm` with the harvester address.
    pub fn remove_harvester(env: Env, caller: Address, harvester: Address) -> Result<(), VaultError> {
        Self::require_governance(&env, &caller)?;
        storage::remove_harvester(&env, &harvester);
        events::harvester_removed(&env, harvester);
        Ok(())
    }

    /// Hands the governance role to `governance`.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not governance
    /// - `InvalidAddress` if `governance` is this vault
    pub fn set_governance(env: Env, caller: Address, governance: Address) -> Result<(), VaultError> {
        Self::require_governance(&env, &caller)?;
        if governance == env.current_contract_address() {
            return Err(VaultError::InvalidAddress);
        }
        storage::set_governance(&env, &governance);
        storage::bump_instance(&env);
        events::governance_set(&env, governance);
        Ok(())
    }

    /// Sends tokens that ended up in the vault by mistake to `to`.
    ///
    /// The deposit, want, reward and yield assets are refused before the
    /// caller is even checked, so no role can drain the vault this way.
    ///
    /// # Errors
    /// - `UnsafeRecovery` if `token` is one of the vault's own assets
    /// - `Unauthorized` if `caller` is not governance
    /// - `InvalidAmount` if `amount` is not positive
    /// - `InvalidAddress` if `to` is this vault
    pub fn recover_stuck_asset(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), VaultError> {
        let config = storage::get_config(&env)?;
        if config.is_protected(&token) {
            return Err(VaultError::UnsafeRecovery);
        }
        Self::require_governance(&env, &caller)?;
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let vault = env.current_contract_address();
        if to == vault {
            return Err(VaultError::InvalidAddress);
        }

        token::Client::new(&env, &token).transfer(&vault, &to, &amount);
        events::recovered(&env, RecoverEvent { token, amount, to });
        Ok(())
    }

    // ==========================================================================
    // READ FUNCTIONS
    // ==========================================================================

    /// Deposit-asset value behind all outstanding shares.
    pub fn deposit_total(env: Env) -> i128 {
        storage::get_ledger(&env).deposit_total
    }

    /// Outstanding share units, as credited by the orchestrator.
    pub fn shares_total(env: Env) -> i128 {
        storage::get_ledger(&env).shares_total
    }

    /// Want-asset balance held for holders. Always zero on single-asset
    /// vaults.
    pub fn want_total(env: Env) -> i128 {
        storage::get_ledger(&env).want_total
    }

    /// The three ledger aggregates read together.
    pub fn ledger(env: Env) -> Ledger {
        storage::get_ledger(&env)
    }

    /// Principal currently held by the farm rather than by the vault.
    pub fn deployed_total(env: Env) -> i128 {
        storage::get_deployed(&env)
    }

    /// Current fee and slippage settings.
    ///
    /// # Errors
    /// - `NotInitialized` before `initialize`
    pub fn settings(env: Env) -> Result<FeeSettings, VaultError> {
        storage::get_settings(&env)
    }

    /// Router paths used by harvest.
    ///
    /// # Errors
    /// - `NotInitialized` before `initialize`
    pub fn paths(env: Env) -> Result<SwapPaths, VaultError> {
        storage::get_paths(&env)
    }

    /// Token, farm, router and sink wiring.
    ///
    /// # Errors
    /// - `NotInitialized` before `initialize`
    pub fn config(env: Env) -> Result<VaultConfig, VaultError> {
        storage::get_config(&env)
    }

    /// Lifecycle state.
    ///
    /// # Errors
    /// - `NotInitialized` before `initialize`
    pub fn state(env: Env) -> Result<LifecycleState, VaultError> {
        storage::get_state(&env)
    }

    /// The orchestrator allowed to move funds and drive the lifecycle.
    ///
    /// # Errors
    /// - `NotInitialized` before `initialize`
    pub fn owner(env: Env) -> Result<Address, VaultError> {
        storage::get_owner(&env)
    }

    /// The address allowed to change settings and roles.
    ///
    /// # Errors
    /// - `NotInitialized` before `initialize`
    pub fn governance(env: Env) -> Result<Address, VaultError> {
        storage::get_governance(&env)
    }

    /// Returns `true` if `harvester` is whitelisted. Governance may harvest
    /// without being listed.
    pub fn is_harvester(env: Env, harvester: Address) -> bool {
        storage::is_harvester(&env, &harvester)
    }

    /// Vault this ledger was handed to, if any.
    pub fn successor(env: Env) -> Option<Address> {
        storage::get_successor(&env)
    }

    /// Snapshot handed to the successor and not yet released to it.
    pub fn handoff(env: Env) -> Option<Ledger> {
        storage::get_handoff(&env)
    }
}

// ============================================================================
// INTERNAL HELPERS
// ============================================================================

impl CompoundingVault {
    #[inline]
    fn require_owner(env: &Env, caller: &Address) -> Result<(), VaultError> {
        caller.require_auth();
        if *caller != storage::get_owner(env)? {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    #[inline]
    fn require_governance(env: &Env, caller: &Address) -> Result<(), VaultError> {
        caller.require_auth();
        if *caller != storage::get_governance(env)? {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    /// Governance may always harvest; anyone else must be whitelisted.
    #[inline]
    fn require_harvester(env: &Env, caller: &Address) -> Result<(), VaultError> {
        caller.require_auth();
        if *caller != storage::get_governance(env)? && !storage::is_harvester(env, caller) {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    fn check_paths(config: &VaultConfig, paths: &SwapPaths) -> Result<(), VaultError> {
        adapters::validate_path(
            &paths.earned_to_reward,
            &config.earned_token,
            &config.reward_token,
        )?;
        adapters::validate_path(
            &paths.earned_to_want,
            &config.earned_token,
            &config.compound_token(),
        )
    }

    fn retire_and_recall(env: &Env) -> Result<i128, VaultError> {
        let next = storage::get_state(env)?.retire()?;
        let config = storage::get_config(env)?;
        let recalled = adapters::recall_all(env, &config);
        storage::set_state(env, next);
        Ok(recalled)
    }
}
