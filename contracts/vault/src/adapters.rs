//! Call contracts of the external farm and swap router, plus the custody
//! moves the vault performs around them.
//!
//! The vault always pushes tokens itself before calling an adapter, and
//! adapters push tokens back to the vault. Every transfer is therefore
//! authorized by the contract that owns the funds as the direct invoker.

use soroban_sdk::{contractclient, log, token, Address, Env, Vec};

use crate::error::VaultError;
use crate::fees::FeeSettings;
use crate::storage::{self, VaultConfig};

/// Yield source holding the vault's deposit asset.
#[contractclient(name = "FarmClient")]
pub trait FarmAdapter {
    /// Records `amount` already transferred to the farm by the vault.
    fn deploy(env: Env, amount: i128);
    /// Sends up to `amount` principal back to the vault, returns what was sent.
    fn recall(env: Env, amount: i128) -> i128;
    /// Sends all principal back to the vault without claiming yield.
    fn emergency_recall_all(env: Env) -> i128;
    fn claimable_yield(env: Env) -> i128;
    /// Sends all claimable yield to the vault, returns the amount.
    fn claim(env: Env) -> i128;
}

/// Router exchanging one asset for another along a path.
#[contractclient(name = "SwapClient")]
pub trait SwapAdapter {
    fn quote(env: Env, path: Vec<Address>, amount_in: i128) -> i128;
    /// Swaps `amount_in` already held by the router and sends the output to
    /// `to`. Fails instead of returning less than `min_amount_out`.
    fn swap_exact_in(
        env: Env,
        path: Vec<Address>,
        amount_in: i128,
        min_amount_out: i128,
        to: Address,
    ) -> i128;
}

/// A path is valid when it is empty and no conversion is needed, or when it
/// runs from `from` to `to` over at least two hops.
pub fn validate_path(path: &Vec<Address>, from: &Address, to: &Address) -> Result<(), VaultError> {
    if path.is_empty() {
        return if from == to {
            Ok(())
        } else {
            Err(VaultError::InvalidPath)
        };
    }
    let connects = path.len() >= 2
        && path.first().as_ref() == Some(from)
        && path.last().as_ref() == Some(to);
    if connects {
        Ok(())
    } else {
        Err(VaultError::InvalidPath)
    }
}

/// Swaps `amount_in` along `path`, bounded by the configured slippage.
pub fn swap(
    env: &Env,
    config: &VaultConfig,
    settings: &FeeSettings,
    path: &Vec<Address>,
    amount_in: i128,
) -> Result<i128, VaultError> {
    if amount_in == 0 || path.is_empty() {
        return Ok(amount_in);
    }
    let router = SwapClient::new(env, &config.router);
    let quoted = match router.try_quote(path, &amount_in) {
        Ok(Ok(quoted)) => quoted,
        _ => return Err(VaultError::SlippageExceeded),
    };
    let min_amount_out = settings.min_amount_out(quoted)?;

    let source = path.first().ok_or(VaultError::InvalidPath)?;
    token::Client::new(env, &source).transfer(
        &env.current_contract_address(),
        &config.router,
        &amount_in,
    );

    let amount_out = match router.try_swap_exact_in(
        path,
        &amount_in,
        &min_amount_out,
        &env.current_contract_address(),
    ) {
        Ok(Ok(amount_out)) => amount_out,
        _ => return Err(VaultError::SlippageExceeded),
    };
    if amount_out < min_amount_out {
        return Err(VaultError::SlippageExceeded);
    }
    Ok(amount_out)
}

/// Moves `amount` of the deposit asset from vault custody into the farm.
pub fn deploy(env: &Env, config: &VaultConfig, amount: i128) -> Result<(), VaultError> {
    if amount <= 0 {
        return Ok(());
    }
    token::Client::new(env, &config.deposit_token).transfer(
        &env.current_contract_address(),
        &config.farm,
        &amount,
    );
    FarmClient::new(env, &config.farm).deploy(&amount);

    let deployed = storage::get_deployed(env)
        .checked_add(amount)
        .ok_or(VaultError::MathOverflow)?;
    storage::set_deployed(env, deployed);
    Ok(())
}

/// Pulls up to `amount` principal back from the farm into vault custody.
///
/// Fails with `FarmShortfall` when the farm sends back less than requested.
pub fn recall(env: &Env, config: &VaultConfig, amount: i128) -> Result<i128, VaultError> {
    let deployed = storage::get_deployed(env);
    let requested = amount.min(deployed);
    if requested <= 0 {
        return Ok(0);
    }
    let recalled = FarmClient::new(env, &config.farm).recall(&requested);
    if recalled < requested {
        return Err(VaultError::FarmShortfall);
    }
    storage::set_deployed(env, deployed - requested);
    Ok(recalled)
}

/// Pulls everything out of the farm. Yield stays behind unclaimed.
///
/// Never fails on a short return: whatever the farm kept stays counted as
/// deployed.
pub fn recall_all(env: &Env, config: &VaultConfig) -> i128 {
    let deployed = storage::get_deployed(env);
    if deployed == 0 {
        return 0;
    }
    let recalled = FarmClient::new(env, &config.farm).emergency_recall_all();
    let remaining = (deployed - recalled).max(0);
    if remaining > 0 {
        log!(env, "farm kept principal", remaining);
    }
    storage::set_deployed(env, remaining);
    recalled
}
