//! Test doubles for the farm and swap router adapters.

use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, Vec};

#[contracttype]
enum FarmKey {
    Vault,
    DepositToken,
    EarnedToken,
    Staked,
    Pending,
    Haircut,
}

/// Keeps mock instances alive when tests advance the ledger sequence.
const MOCK_TTL: u32 = 100_000;

/// Farm holding the vault's principal and paying yield set via `accrue`.
#[contract]
pub struct MockFarm;

#[contractimpl]
impl MockFarm {
    pub fn init(env: Env, vault: Address, deposit_token: Address, earned_token: Address) {
        env.storage().instance().set(&FarmKey::Vault, &vault);
        env.storage().instance().set(&FarmKey::DepositToken, &deposit_token);
        env.storage().instance().set(&FarmKey::EarnedToken, &earned_token);
        env.storage().instance().extend_ttl(MOCK_TTL, MOCK_TTL);
    }

    /// Makes recalls send back only `(10000 - haircut_bps) / 10000` of the
    /// requested principal. The rest is lost.
    pub fn set_haircut(env: Env, haircut_bps: i128) {
        env.storage().instance().set(&FarmKey::Haircut, &haircut_bps);
    }

    /// Makes `amount` of the earned token claimable. The test mints it to the
    /// farm beforehand.
    pub fn accrue(env: Env, amount: i128) {
        let pending = Self::claimable_yield(env.clone());
        env.storage().instance().set(&FarmKey::Pending, &(pending + amount));
    }

    pub fn staked(env: Env) -> i128 {
        env.storage().instance().get(&FarmKey::Staked).unwrap_or(0)
    }

    pub fn deploy(env: Env, amount: i128) {
        Self::vault(&env).require_auth();
        let staked = Self::staked(env.clone());
        env.storage().instance().set(&FarmKey::Staked, &(staked + amount));
    }

    pub fn recall(env: Env, amount: i128) -> i128 {
        let vault = Self::vault(&env);
        vault.require_auth();
        let staked = Self::staked(env.clone());
        assert!(amount <= staked, "recall exceeds stake");
        env.storage().instance().set(&FarmKey::Staked, &(staked - amount));
        let haircut: i128 = env.storage().instance().get(&FarmKey::Haircut).unwrap_or(0);
        let sent = amount * (10_000 - haircut) / 10_000;
        if sent > 0 {
            Self::token(&env, FarmKey::DepositToken).transfer(
                &env.current_contract_address(),
                &vault,
                &sent,
            );
        }
        sent
    }

    pub fn emergency_recall_all(env: Env) -> i128 {
        let staked = Self::staked(env.clone());
        Self::recall(env, staked)
    }

    pub fn claimable_yield(env: Env) -> i128 {
        env.storage().instance().get(&FarmKey::Pending).unwrap_or(0)
    }

    pub fn claim(env: Env) -> i128 {
        let vault = Self::vault(&env);
        vault.require_auth();
        let pending = Self::claimable_yield(env.clone());
        env.storage().instance().set(&FarmKey::Pending, &0_i128);
        if pending > 0 {
            Self::token(&env, FarmKey::EarnedToken).transfer(
                &env.current_contract_address(),
                &vault,
                &pending,
            );
        }
        pending
    }
}

impl MockFarm {
    fn vault(env: &Env) -> Address {
        env.storage().instance().get(&FarmKey::Vault).unwrap()
    }

    fn token(env: &Env, key: FarmKey) -> token::Client<'_> {
        let address: Address = env.storage().instance().get(&key).unwrap();
        token::Client::new(env, &address)
    }
}

#[contracttype]
enum RouterKey {
    RateNum,
    RateDen,
    Shortfall,
}

/// Router swapping at a fixed rate out of its own liquidity. `shortfall_bps`
/// makes execution land below the quote.
#[contract]
pub struct MockRouter;

#[contractimpl]
impl MockRouter {
    pub fn set_rate(env: Env, numerator: i128, denominator: i128) {
        env.storage().instance().set(&RouterKey::RateNum, &numerator);
        env.storage().instance().set(&RouterKey::RateDen, &denominator);
        env.storage().instance().extend_ttl(MOCK_TTL, MOCK_TTL);
    }

    pub fn set_shortfall(env: Env, shortfall_bps: i128) {
        env.storage().instance().set(&RouterKey::Shortfall, &shortfall_bps);
    }

    pub fn quote(env: Env, _path: Vec<Address>, amount_in: i128) -> i128 {
        let numerator: i128 = env.storage().instance().get(&RouterKey::RateNum).unwrap_or(1);
        let denominator: i128 = env.storage().instance().get(&RouterKey::RateDen).unwrap_or(1);
        amount_in * numerator / denominator
    }

    pub fn swap_exact_in(
        env: Env,
        path: Vec<Address>,
        amount_in: i128,
        min_amount_out: i128,
        to: Address,
    ) -> i128 {
        let shortfall: i128 = env.storage().instance().get(&RouterKey::Shortfall).unwrap_or(0);
        let quoted = Self::quote(env.clone(), path.clone(), amount_in);
        let amount_out = quoted * (10_000 - shortfall) / 10_000;
        assert!(amount_out >= min_amount_out, "insufficient output amount");

        let target = path.last().unwrap();
        token::Client::new(&env, &target).transfer(&env.current_contract_address(), &to, &amount_out);
        amount_out
    }
}
