//! Loan lifecycle: `NoLoan -> Active -> {Repaid, Defaulted}`, one loan slot per
//! account. A terminal record frees the slot for the next origination.

use soroban_sdk::{log, symbol_short, Address, Env};

use crate::events::{publish_loan, publish_repayment, LoanEvent, RepaymentEvent};
use crate::types::{total_due, ContractError, LoanDetails, LoanQuote, LoanRecord, LoanState};
use crate::{pool, rate, score, storage};

fn active_loan(env: &Env, borrower: &Address) -> Result<LoanRecord, ContractError> {
    storage::read_loan(env, borrower)
        .filter(|loan| loan.active)
        .ok_or(ContractError::NoActiveLoan)
}

pub fn details(env: &Env, borrower: &Address) -> LoanDetails {
    storage::read_loan(env, borrower)
        .map(|loan| loan.details())
        .unwrap_or_default()
}

pub fn state(env: &Env, borrower: &Address) -> LoanState {
    storage::read_loan(env, borrower)
        .map(|loan| loan.state())
        .unwrap_or(LoanState::NoLoan)
}

/// What `request_loan(borrower, amount)` would do right now, without doing it.
pub fn quote(env: &Env, borrower: &Address, amount: i128) -> Result<LoanQuote, ContractError> {
    let policy = storage::read_policy(env)?;
    let credit = storage::read_credit(env, borrower);
    let available_liquidity = pool::available(env);
    let has_active_loan = storage::read_loan(env, borrower).is_some_and(|loan| loan.active);
    let interest_rate = rate::interest_rate_bps(credit.sente_score);
    let amount_in_range = amount > 0 && amount <= policy.max_loan_amount;
    let total_due = if amount_in_range {
        total_due(amount, interest_rate)?
    } else {
        0
    };

    Ok(LoanQuote {
        sente_score: credit.sente_score,
        required_score: policy.min_score,
        max_loan_amount: policy.max_loan_amount,
        available_liquidity,
        interest_rate,
        total_due,
        due_date: env
            .ledger()
            .timestamp()
            .saturating_add(policy.loan_term_secs),
        has_active_loan,
        eligible: !has_active_loan
            && amount_in_range
            && credit.sente_score >= policy.min_score
            && amount <= available_liquidity,
    })
}

/// Originates a loan and disburses `amount` to the borrower.
///
/// # Errors
/// * `LoanAlreadyActive` – the borrower's slot is taken
/// * `LoanLimitExceeded` – `amount` is not in `(0, max_loan_amount]`
/// * `IneligibleScore` – score below `min_score`
/// * `InsufficientPoolLiquidity` – pool cannot cover `amount`
pub fn request(env: &Env, borrower: &Address, amount: i128) -> Result<LoanRecord, ContractError> {
    let policy = storage::read_policy(env)?;

    if storage::read_loan(env, borrower).is_some_and(|loan| loan.active) {
        return Err(ContractError::LoanAlreadyActive);
    }
    if amount <= 0 || amount > policy.max_loan_amount {
        return Err(ContractError::LoanLimitExceeded);
    }
    let credit = storage::read_credit(env, borrower);
    if credit.sente_score < policy.min_score {
        log!(
            env,
            "score below required",
            credit.sente_score,
            policy.min_score
        );
        return Err(ContractError::IneligibleScore);
    }
    if amount > pool::available(env) {
        return Err(ContractError::InsufficientPoolLiquidity);
    }

    let due_date = env
        .ledger()
        .timestamp()
        .checked_add(policy.loan_term_secs)
        .ok_or(ContractError::Overflow)?;
    let loan = LoanRecord {
        amount,
        interest_rate: rate::interest_rate_bps(credit.sente_score),
        due_date,
        amount_repaid: 0,
        active: true,
        defaulted: false,
    };
    loan.total_due()?;

    storage::write_loan(env, borrower, &loan);
    score::on_loan_originated(env, borrower)?;
    pool::disburse(env, borrower, amount)?;

    publish_loan(env, symbol_short!("loan_req"), LoanEvent::new(borrower, &loan));
    Ok(loan)
}

/// Applies a repayment. `None` pays the exact remaining amount; `Some(amount)`
/// is capped at the remaining amount so an overpayment never leaves the
/// borrower's balance.
///
/// # Errors
/// * `NoActiveLoan` – nothing to repay
/// * `InvalidAmount` – `amount` is zero or negative
pub fn repay(
    env: &Env,
    borrower: &Address,
    amount: Option<i128>,
) -> Result<LoanRecord, ContractError> {
    let policy = storage::read_policy(env)?;
    let mut loan = active_loan(env, borrower)?;
    let remaining = loan.remaining_amount()?;

    let payment = match amount {
        Some(amount) if amount <= 0 => return Err(ContractError::InvalidAmount),
        Some(amount) => amount.min(remaining),
        None => remaining,
    };

    loan.amount_repaid = loan
        .amount_repaid
        .checked_add(payment)
        .ok_or(ContractError::Overflow)?;
    let remaining = remaining - payment;
    if remaining == 0 {
        loan.active = false;
    }

    // Checks-effects-interactions: record the payment before pulling tokens
    storage::write_loan(env, borrower, &loan);
    pool::collect(env, borrower, payment)?;

    let now = env.ledger().timestamp();
    publish_repayment(
        env,
        RepaymentEvent {
            borrower: borrower.clone(),
            amount: payment,
            remaining_amount: remaining,
            timestamp: now,
        },
    );

    if !loan.active {
        let on_time = now <= loan.due_date;
        score::on_repayment_completed(env, borrower, on_time, &policy)?;
        publish_loan(env, symbol_short!("repaid"), LoanEvent::new(borrower, &loan));
    }
    Ok(loan)
}

/// Classifies an overdue loan as uncollectable. Calling it again on the same
/// defaulted loan returns the record unchanged.
///
/// # Errors
/// * `NoActiveLoan` – no loan, or the loan was repaid
/// * `LoanNotOverdue` – `now <= due_date`
pub fn mark_default(env: &Env, borrower: &Address) -> Result<LoanRecord, ContractError> {
    let policy = storage::read_policy(env)?;
    let mut loan = storage::read_loan(env, borrower).ok_or(ContractError::NoActiveLoan)?;

    if loan.defaulted {
        return Ok(loan);
    }
    if !loan.active {
        return Err(ContractError::NoActiveLoan);
    }
    if env.ledger().timestamp() <= loan.due_date {
        return Err(ContractError::LoanNotOverdue);
    }

    loan.active = false;
    loan.defaulted = true;
    storage::write_loan(env, borrower, &loan);
    score::on_default(env, borrower, &policy);

    publish_loan(env, symbol_short!("default"), LoanEvent::new(borrower, &loan));
    Ok(loan)
}
