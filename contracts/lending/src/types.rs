//! Core data types for the lending contract.

use soroban_sdk::{contracterror, contracttype};

/// Upper bound of the SenteScore scale.
pub const MAX_SCORE: u32 = 100;
/// Rates are expressed in basis points; 10_000 bps = 100%.
pub const BPS_DENOMINATOR: i128 = 10_000;
/// Loan cap in whole tokens, before scaling by the token's decimals.
pub const MAX_LOAN_WHOLE_TOKENS: i128 = 1_000;

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    IneligibleScore = 4,
    LoanLimitExceeded = 5,
    LoanAlreadyActive = 6,
    InsufficientPoolLiquidity = 7,
    NoActiveLoan = 8,
    RateLimited = 9,
    LoanNotOverdue = 10,
    InvalidPolicy = 11,
    Overflow = 12,
}

/// Per-account credit statistics. Created lazily with a zero score.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreditData {
    pub sente_score: u32,
    pub total_loans: u32,
    pub successful_repayments: u32,
    /// Ledger timestamp of the most recent score mutation. Only meaningful
    /// once `score_updated` is set.
    pub last_update_time: u64,
    pub transaction_count: u32,
    /// Set by the first score mutation; 0 is a valid `last_update_time`.
    pub score_updated: bool,
}

/// Stored loan for a borrower. Never deleted; a new origination overwrites a
/// terminal record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRecord {
    pub amount: i128,
    /// Fixed at origination.
    pub interest_rate: u32,
    pub due_date: u64,
    pub amount_repaid: i128,
    pub active: bool,
    pub defaulted: bool,
}

impl LoanRecord {
    /// `amount + amount * interest_rate / 10_000`, truncating.
    pub fn total_due(&self) -> Result<i128, ContractError> {
        total_due(self.amount, self.interest_rate)
    }

    pub fn remaining_amount(&self) -> Result<i128, ContractError> {
        self.total_due()?
            .checked_sub(self.amount_repaid)
            .ok_or(ContractError::Overflow)
    }

    /// Caller-facing view. Saturating arithmetic is exact here because
    /// origination rejects any principal whose `total_due` overflows.
    pub fn details(&self) -> LoanDetails {
        let interest =
            self.amount.saturating_mul(self.interest_rate as i128) / BPS_DENOMINATOR;
        let total_due = self.amount.saturating_add(interest);
        LoanDetails {
            amount: self.amount,
            interest_rate: self.interest_rate,
            due_date: self.due_date,
            amount_repaid: self.amount_repaid,
            active: self.active,
            defaulted: self.defaulted,
            total_due,
            remaining_amount: total_due.saturating_sub(self.amount_repaid),
        }
    }

    pub fn state(&self) -> LoanState {
        match (self.active, self.defaulted) {
            (true, _) => LoanState::Active,
            (false, true) => LoanState::Defaulted,
            (false, false) => LoanState::Repaid,
        }
    }
}

pub fn total_due(amount: i128, interest_rate: u32) -> Result<i128, ContractError> {
    let interest = amount
        .checked_mul(interest_rate as i128)
        .ok_or(ContractError::Overflow)?
        / BPS_DENOMINATOR;
    amount.checked_add(interest).ok_or(ContractError::Overflow)
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoanState {
    NoLoan = 0,
    Active = 1,
    Repaid = 2,
    Defaulted = 3,
}

/// Loan view returned to callers, stored fields plus the derived amounts.
/// All fields are zero/false for an account that never borrowed.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoanDetails {
    pub amount: i128,
    pub interest_rate: u32,
    pub due_date: u64,
    pub amount_repaid: i128,
    pub active: bool,
    pub defaulted: bool,
    pub total_due: i128,
    pub remaining_amount: i128,
}

/// Everything a borrower needs to know before calling `request_loan`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanQuote {
    pub sente_score: u32,
    pub required_score: u32,
    pub max_loan_amount: i128,
    pub available_liquidity: i128,
    pub interest_rate: u32,
    pub total_due: i128,
    pub due_date: u64,
    pub has_active_loan: bool,
    pub eligible: bool,
}

/// Admin-configurable lending policy.
///
/// * `min_score` – score required to originate a loan.
/// * `max_loan_amount` – largest principal, in the token's base units.
/// * `loan_term_secs` – added to the origination timestamp to get `due_date`.
/// * `activity_cooldown_secs` – minimum gap between a score mutation and the
///   next `record_transaction`. Set to `0` to disable rate limiting.
/// * `activity_delta`, `on_time_repayment_delta`, `late_repayment_delta` –
///   positive score adjustments.
/// * `default_penalty` – score removed when a loan defaults.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LendingPolicy {
    pub min_score: u32,
    pub max_loan_amount: i128,
    pub loan_term_secs: u64,
    pub activity_cooldown_secs: u64,
    pub activity_delta: u32,
    pub on_time_repayment_delta: u32,
    pub late_repayment_delta: u32,
    pub default_penalty: u32,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            min_score: 60,
            max_loan_amount: MAX_LOAN_WHOLE_TOKENS,
            loan_term_secs: 30 * 24 * 60 * 60,
            activity_cooldown_secs: 60 * 60,
            activity_delta: 5,
            on_time_repayment_delta: 10,
            late_repayment_delta: 3,
            default_penalty: 25,
        }
    }
}

impl LendingPolicy {
    /// Default policy with the loan cap scaled to a token with `decimals`
    /// fractional digits, so `1000 * 10^decimals` base units is the limit.
    pub fn for_decimals(decimals: u32) -> Result<Self, ContractError> {
        let max_loan_amount = 10_i128
            .checked_pow(decimals)
            .and_then(|unit| unit.checked_mul(MAX_LOAN_WHOLE_TOKENS))
            .ok_or(ContractError::Overflow)?;
        Ok(Self {
            max_loan_amount,
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        let deltas = [
            self.activity_delta,
            self.on_time_repayment_delta,
            self.late_repayment_delta,
            self.default_penalty,
        ];
        if self.min_score > MAX_SCORE
            || self.max_loan_amount <= 0
            || self.loan_term_secs == 0
            || deltas.iter().any(|d| *d > MAX_SCORE)
        {
            return Err(ContractError::InvalidPolicy);
        }
        Ok(())
    }
}
