//! SenteScore engine. Every score mutation goes through `apply`, which clamps
//! the result to `[0, MAX_SCORE]`.

use soroban_sdk::{log, Address, Env};

use crate::events::{publish_score, ScoreEvent};
use crate::storage;
use crate::types::{ContractError, CreditData, LendingPolicy, MAX_SCORE};

enum Delta {
    Up(u32),
    Down(u32),
}

fn apply(score: u32, delta: Delta) -> u32 {
    match delta {
        Delta::Up(d) => score.saturating_add(d).min(MAX_SCORE),
        Delta::Down(d) => score.saturating_sub(d),
    }
}

fn incr(counter: u32) -> Result<u32, ContractError> {
    counter.checked_add(1).ok_or(ContractError::Overflow)
}

fn commit(env: &Env, account: &Address, credit: &CreditData) {
    storage::write_credit(env, account, credit);
    publish_score(
        env,
        ScoreEvent::new(account, credit, env.ledger().timestamp()),
    );
}

/// Creates the account's credit record on first contact. Returns the current
/// data either way; the score itself is left untouched.
pub fn touch(env: &Env, account: &Address) -> CreditData {
    let credit = storage::read_credit(env, account);
    if !storage::has_credit(env, account) {
        commit(env, account, &credit);
    }
    credit
}

/// Activity boost, rate-limited by `activity_cooldown_secs` since the last
/// score mutation.
pub fn record_activity(
    env: &Env,
    account: &Address,
    policy: &LendingPolicy,
) -> Result<CreditData, ContractError> {
    let now = env.ledger().timestamp();
    let mut credit = storage::read_credit(env, account);

    if credit.score_updated {
        let next_allowed = credit
            .last_update_time
            .saturating_add(policy.activity_cooldown_secs);
        if now < next_allowed {
            log!(env, "record_transaction rate limited until", next_allowed);
            return Err(ContractError::RateLimited);
        }
    }

    credit.transaction_count = incr(credit.transaction_count)?;
    credit.sente_score = apply(credit.sente_score, Delta::Up(policy.activity_delta));
    credit.last_update_time = now;
    credit.score_updated = true;
    commit(env, account, &credit);
    Ok(credit)
}

/// Counts a new origination. Borrowing alone never moves the score.
pub fn on_loan_originated(env: &Env, account: &Address) -> Result<CreditData, ContractError> {
    let mut credit = storage::read_credit(env, account);
    credit.total_loans = incr(credit.total_loans)?;
    commit(env, account, &credit);
    Ok(credit)
}

pub fn on_repayment_completed(
    env: &Env,
    account: &Address,
    on_time: bool,
    policy: &LendingPolicy,
) -> Result<CreditData, ContractError> {
    let mut credit = storage::read_credit(env, account);
    let delta = if on_time {
        credit.successful_repayments = incr(credit.successful_repayments)?;
        policy.on_time_repayment_delta
    } else {
        policy.late_repayment_delta
    };
    credit.sente_score = apply(credit.sente_score, Delta::Up(delta));
    credit.last_update_time = env.ledger().timestamp();
    credit.score_updated = true;
    commit(env, account, &credit);
    Ok(credit)
}

/// Penalty only; loan and repayment counters are history and stay as they are.
pub fn on_default(env: &Env, account: &Address, policy: &LendingPolicy) -> CreditData {
    let mut credit = storage::read_credit(env, account);
    credit.sente_score = apply(credit.sente_score, Delta::Down(policy.default_penalty));
    credit.last_update_time = env.ledger().timestamp();
    credit.score_updated = true;
    commit(env, account, &credit);
    credit
}
