use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::error::VaultError;
use crate::fees::FeeSettings;
use crate::ledger::Ledger;
use crate::lifecycle::LifecycleState;

const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Storage keys for vault state.
///
/// Everything the vault reads on every call lives in instance storage.
/// Harvester whitelist entries are per-address and live in persistent storage.
#[contracttype]
pub enum DataKey {
    Config,
    Owner,
    Governance,
    Settings,
    Paths,
    Ledger,
    /// Principal currently held by the farm adapter.
    Deployed,
    State,
    /// Set once the ledger has been handed to a successor vault.
    Successor,
    /// Snapshot handed to the successor and not yet released to it.
    Handoff,
    Harvester(Address),
}

/// Fixed wiring of a vault, set once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    /// Asset accepted by `deposit` and deployed into the farm.
    pub deposit_token: Address,
    /// Present only on two-asset vaults: yield is held in this asset.
    pub want_token: Option<Address>,
    /// Native yield asset paid out by the farm.
    pub earned_token: Address,
    /// Asset performance fees are paid in.
    pub reward_token: Address,
    pub farm: Address,
    pub router: Address,
    /// Rewards sink.
    pub rewards: Address,
    /// Treasury sink; also receives entrance fees.
    pub treasury: Address,
}

impl VaultConfig {
    /// Asset that reinvested yield is converted into.
    pub fn compound_token(&self) -> Address {
        self.want_token
            .clone()
            .unwrap_or_else(|| self.deposit_token.clone())
    }

    pub fn is_protected(&self, token: &Address) -> bool {
        *token == self.deposit_token
            || *token == self.earned_token
            || *token == self.reward_token
            || self.want_token.as_ref() == Some(token)
    }
}

/// Router paths used by harvest. An empty path means no swap is needed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapPaths {
    pub earned_to_reward: Vec<Address>,
    pub earned_to_want: Vec<Address>,
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<VaultConfig, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_owner(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_governance(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Governance)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_governance(env: &Env, governance: &Address) {
    env.storage().instance().set(&DataKey::Governance, governance);
}

pub fn get_settings(env: &Env) -> Result<FeeSettings, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Settings)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_settings(env: &Env, settings: &FeeSettings) {
    env.storage().instance().set(&DataKey::Settings, settings);
}

pub fn get_paths(env: &Env) -> Result<SwapPaths, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Paths)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_paths(env: &Env, paths: &SwapPaths) {
    env.storage().instance().set(&DataKey::Paths, paths);
}

pub fn get_ledger(env: &Env) -> Ledger {
    env.storage()
        .instance()
        .get(&DataKey::Ledger)
        .unwrap_or_default()
}

pub fn set_ledger(env: &Env, ledger: &Ledger) {
    env.storage().instance().set(&DataKey::Ledger, ledger);
}

pub fn get_deployed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Deployed)
        .unwrap_or(0)
}

pub fn set_deployed(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::Deployed, &amount);
}

pub fn get_state(env: &Env) -> Result<LifecycleState, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_state(env: &Env, state: LifecycleState) {
    env.storage().instance().set(&DataKey::State, &state);
}

pub fn get_successor(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Successor)
}

pub fn set_successor(env: &Env, successor: &Address) {
    env.storage().instance().set(&DataKey::Successor, successor);
}

pub fn get_handoff(env: &Env) -> Option<Ledger> {
    env.storage().instance().get(&DataKey::Handoff)
}

pub fn set_handoff(env: &Env, snapshot: &Ledger) {
    env.storage().instance().set(&DataKey::Handoff, snapshot);
}

pub fn remove_handoff(env: &Env) {
    env.storage().instance().remove(&DataKey::Handoff);
}

pub fn is_harvester(env: &Env, harvester: &Address) -> bool {
    let key = DataKey::Harvester(harvester.clone());
    let listed = env.storage().persistent().has(&key);
    if listed {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    listed
}

pub fn add_harvester(env: &Env, harvester: &Address) {
    let key = DataKey::Harvester(harvester.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn remove_harvester(env: &Env, harvester: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Harvester(harvester.clone()));
}
