#![no_std]

//! SenteScore lending contract: per-account credit scores, a single active
//! micro-loan per account, a tiered interest schedule and the fund pool
//! loans are paid out of.
//!
//! # Atomicity
//! The Soroban host runs each invocation to completion, one at a time, inside
//! a storage transaction. An invocation that returns an error is rolled back
//! entirely, so no operation here can leave a half-disbursed loan or a
//! partially applied score change. Read accessors only ever see committed
//! state.

mod events;
mod loan;
mod pool;
mod rate;
mod score;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, token, Address, BytesN, Env};

pub use events::{LoanEvent, PoolEvent, RepaymentEvent, ScoreEvent};
pub use rate::RATE_TIERS;
pub use types::{
    ContractError, CreditData, LendingPolicy, LoanDetails, LoanQuote, LoanRecord, LoanState,
};

fn require_admin_auth(env: &Env) -> Result<Address, ContractError> {
    let admin = storage::read_admin(env)?;
    admin.require_auth();
    Ok(admin)
}

#[contract]
pub struct SenteLending;

#[contractimpl]
impl SenteLending {
    /// Initialize the contract with admin and the lending token address.
    /// Installs the default `LendingPolicy`, with the loan cap scaled to the
    /// token's decimals.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        let decimals = token::Client::new(&env, &token).decimals();
        let policy = LendingPolicy::for_decimals(decimals)?;
        storage::write_admin(&env, &admin);
        storage::write_token(&env, &token);
        storage::write_policy(&env, &policy);
        storage::write_pool_balance(&env, 0);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Replace the lending policy (admin only). Existing loans keep the rate
    /// and due date they were originated with.
    pub fn set_policy(env: Env, policy: LendingPolicy) -> Result<(), ContractError> {
        require_admin_auth(&env)?;
        policy.validate()?;
        storage::write_policy(&env, &policy);
        storage::bump_instance(&env);
        events::publish_policy(&env, policy);
        Ok(())
    }

    pub fn get_policy(env: Env) -> Result<LendingPolicy, ContractError> {
        storage::read_policy(&env)
    }

    /// Upgrade the contract to new wasm (admin only).
    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), ContractError> {
        require_admin_auth(&env)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // ── fund pool ────────────────────────────────────────────────────────────

    /// Move `amount` from the admin into the pool. Returns the new liquidity.
    pub fn deposit_funds(env: Env, amount: i128) -> Result<i128, ContractError> {
        let admin = require_admin_auth(&env)?;
        storage::bump_instance(&env);
        let available = pool::deposit(&env, &admin, amount)?;
        events::publish_deposit(&env, PoolEvent { amount, available });
        Ok(available)
    }

    /// Move `amount` from the pool back to the admin. Returns the new liquidity.
    ///
    /// # Errors
    /// * `InsufficientPoolLiquidity` – more than the available balance
    pub fn withdraw_funds(env: Env, amount: i128) -> Result<i128, ContractError> {
        let admin = require_admin_auth(&env)?;
        storage::bump_instance(&env);
        let available = pool::withdraw(&env, &admin, amount)?;
        events::publish_withdraw(&env, PoolEvent { amount, available });
        Ok(available)
    }

    // ── score engine ─────────────────────────────────────────────────────────

    /// Record score-boosting activity for `user`.
    ///
    /// # Errors
    /// * `RateLimited` – called again within `activity_cooldown_secs` of the
    ///   last score change
    pub fn record_transaction(env: Env, user: Address) -> Result<CreditData, ContractError> {
        user.require_auth();
        let policy = storage::read_policy(&env)?;
        storage::bump_instance(&env);
        score::record_activity(&env, &user, &policy)
    }

    /// Register `user` on first contact and return the current score. Never
    /// moves the score.
    pub fn update_sente_score(env: Env, user: Address) -> Result<u32, ContractError> {
        storage::read_policy(&env)?;
        storage::bump_instance(&env);
        Ok(score::touch(&env, &user).sente_score)
    }

    // ── loans ────────────────────────────────────────────────────────────────

    /// Originate a loan of `amount` and transfer it to `borrower`.
    pub fn request_loan(
        env: Env,
        borrower: Address,
        amount: i128,
    ) -> Result<LoanDetails, ContractError> {
        borrower.require_auth();
        storage::bump_instance(&env);
        loan::request(&env, &borrower, amount).map(|loan| loan.details())
    }

    /// Repay the exact remaining amount of the active loan.
    pub fn repay_loan(env: Env, borrower: Address) -> Result<LoanDetails, ContractError> {
        borrower.require_auth();
        storage::bump_instance(&env);
        loan::repay(&env, &borrower, None).map(|loan| loan.details())
    }

    /// Repay part of the active loan. Payments above the remaining amount are
    /// capped; only the remaining amount is transferred.
    pub fn repay_partial(
        env: Env,
        borrower: Address,
        amount: i128,
    ) -> Result<LoanDetails, ContractError> {
        borrower.require_auth();
        storage::bump_instance(&env);
        loan::repay(&env, &borrower, Some(amount)).map(|loan| loan.details())
    }

    /// Mark an overdue loan as defaulted (admin only). Idempotent.
    pub fn mark_default(env: Env, borrower: Address) -> Result<LoanDetails, ContractError> {
        require_admin_auth(&env)?;
        storage::bump_instance(&env);
        loan::mark_default(&env, &borrower).map(|loan| loan.details())
    }

    // ── views ────────────────────────────────────────────────────────────────

    pub fn calculate_interest_rate(_env: Env, score: u32) -> u32 {
        rate::interest_rate_bps(score)
    }

    pub fn quote_loan(
        env: Env,
        borrower: Address,
        amount: i128,
    ) -> Result<LoanQuote, ContractError> {
        loan::quote(&env, &borrower, amount)
    }

    pub fn get_loan_details(env: Env, user: Address) -> LoanDetails {
        loan::details(&env, &user)
    }

    pub fn get_loan_state(env: Env, user: Address) -> LoanState {
        loan::state(&env, &user)
    }

    pub fn get_sente_score(env: Env, user: Address) -> u32 {
        storage::read_credit(&env, &user).sente_score
    }

    pub fn get_credit_data(env: Env, user: Address) -> CreditData {
        storage::read_credit(&env, &user)
    }

    /// Pool liquidity available for disbursement.
    pub fn get_contract_balance(env: Env) -> i128 {
        pool::available(&env)
    }
}
