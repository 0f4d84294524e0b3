//! Contract events, all under the `sente` topic: pool movements, score
//! changes and loan transitions. Payload shapes are part of the public API.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::{CreditData, LendingPolicy, LoanRecord};

/// Event emitted when pool liquidity changes through the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolEvent {
    pub amount: i128,
    pub available: i128,
}

/// Event emitted whenever an account's score or counters change.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoreEvent {
    pub account: Address,
    pub sente_score: u32,
    pub total_loans: u32,
    pub successful_repayments: u32,
    pub transaction_count: u32,
    pub timestamp: u64,
}

impl ScoreEvent {
    pub fn new(account: &Address, credit: &CreditData, timestamp: u64) -> Self {
        Self {
            account: account.clone(),
            sente_score: credit.sente_score,
            total_loans: credit.total_loans,
            successful_repayments: credit.successful_repayments,
            transaction_count: credit.transaction_count,
            timestamp,
        }
    }
}

/// Event emitted on loan lifecycle transitions (requested, repaid, defaulted).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanEvent {
    pub borrower: Address,
    pub amount: i128,
    pub interest_rate: u32,
    pub due_date: u64,
    pub amount_repaid: i128,
}

impl LoanEvent {
    pub fn new(borrower: &Address, loan: &LoanRecord) -> Self {
        Self {
            borrower: borrower.clone(),
            amount: loan.amount,
            interest_rate: loan.interest_rate,
            due_date: loan.due_date,
            amount_repaid: loan.amount_repaid,
        }
    }
}

/// Event emitted for every repayment, partial or final.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepaymentEvent {
    pub borrower: Address,
    pub amount: i128,
    pub remaining_amount: i128,
    pub timestamp: u64,
}

fn topic(action: Symbol) -> (Symbol, Symbol) {
    (symbol_short!("sente"), action)
}

pub fn publish_deposit(env: &Env, event: PoolEvent) {
    env.events().publish(topic(symbol_short!("deposit")), event);
}

pub fn publish_withdraw(env: &Env, event: PoolEvent) {
    env.events().publish(topic(symbol_short!("withdraw")), event);
}

pub fn publish_score(env: &Env, event: ScoreEvent) {
    env.events().publish(topic(symbol_short!("score")), event);
}

/// `action` is one of `loan_req`, `repaid`, `default`.
pub fn publish_loan(env: &Env, action: Symbol, event: LoanEvent) {
    env.events().publish(topic(action), event);
}

pub fn publish_repayment(env: &Env, event: RepaymentEvent) {
    env.events().publish(topic(symbol_short!("repay")), event);
}

pub fn publish_policy(env: &Env, policy: LendingPolicy) {
    env.events().publish(topic(symbol_short!("policy")), policy);
}
