//! Events published for every state change.
//!
//! Each event has a single short-symbol topic and a typed payload, so
//! off-chain accounting can follow the ledger without reading storage.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::fees::FeeSettings;
use crate::lifecycle::LifecycleState;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub governance: Address,
    pub deposit_token: Address,
    pub two_asset: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    /// Account the deposit asset was pulled from.
    pub from: Address,
    pub amount: i128,
    /// Value credited after the entrance fee.
    pub credited: i128,
    pub shares: i128,
    pub deposit_total: i128,
    pub shares_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub to: Address,
    pub shares: i128,
    pub deposit_amount: i128,
    pub want_amount: i128,
    pub deposit_total: i128,
    pub shares_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestEvent {
    pub harvested: i128,
    /// Amount added to `deposit_total` or `want_total` after swapping.
    pub compounded: i128,
    pub deposit_total: i128,
    pub want_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesEvent {
    pub to_rewards: i128,
    pub to_treasury: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LifecycleEvent {
    pub state: LifecycleState,
    /// Principal moved between the farm and vault custody by the transition.
    pub principal: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationEvent {
    /// Successor for `upgr_to`, predecessor for `upgr_from`.
    pub counterpart: Address,
    pub shares: i128,
    pub deposit_amount: i128,
    pub want_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoverEvent {
    pub token: Address,
    pub amount: i128,
    pub to: Address,
}

pub fn initialized(env: &Env, event: InitializedEvent) {
    env.events().publish((symbol_short!("init"),), event);
}

pub fn deposited(env: &Env, event: DepositEvent) {
    env.events().publish((symbol_short!("deposit"),), event);
}

pub fn withdrawn(env: &Env, event: WithdrawEvent) {
    env.events().publish((symbol_short!("withdraw"),), event);
}

pub fn harvested(env: &Env, event: HarvestEvent) {
    env.events().publish((symbol_short!("harvest"),), event);
}

pub fn fees_distributed(env: &Env, event: FeesEvent) {
    env.events().publish((symbol_short!("fees"),), event);
}

pub fn paused(env: &Env, recalled: i128) {
    env.events().publish(
        (symbol_short!("paused"),),
        LifecycleEvent {
            state: LifecycleState::Paused,
            principal: recalled,
        },
    );
}

pub fn unpaused(env: &Env, redeployed: i128) {
    env.events().publish(
        (symbol_short!("unpaused"),),
        LifecycleEvent {
            state: LifecycleState::Active,
            principal: redeployed,
        },
    );
}

pub fn panicked(env: &Env, recalled: i128) {
    env.events().publish(
        (symbol_short!("panic"),),
        LifecycleEvent {
            state: LifecycleState::Paused,
            principal: recalled,
        },
    );
}

pub fn retired(env: &Env, recalled: i128) {
    env.events().publish(
        (symbol_short!("retired"),),
        LifecycleEvent {
            state: LifecycleState::Retired,
            principal: recalled,
        },
    );
}

pub fn upgraded_to(env: &Env, event: MigrationEvent) {
    env.events().publish((symbol_short!("upgr_to"),), event);
}

pub fn released(env: &Env, event: MigrationEvent) {
    env.events().publish((symbol_short!("released"),), event);
}

pub fn upgraded_from(env: &Env, event: MigrationEvent) {
    env.events().publish((symbol_short!("upgr_from"),), event);
}

pub fn settings_updated(env: &Env, settings: FeeSettings) {
    env.events().publish((symbol_short!("settings"),), settings);
}

pub fn harvester_added(env: &Env, harvester: Address) {
    env.events().publish((symbol_short!("harv_add"),), harvester);
}

pub fn harvester_removed(env: &Env, harvester: Address) {
    env.events().publish((symbol_short!("harv_rm"),), harvester);
}

pub fn governance_set(env: &Env, governance: Address) {
    env.events().publish((symbol_short!("gov_set"),), governance);
}

pub fn paths_updated(env: &Env) {
    env.events().publish((symbol_short!("paths"),), ());
}

pub fn recovered(env: &Env, event: RecoverEvent) {
    env.events().publish((symbol_short!("recover"),), event);
}
