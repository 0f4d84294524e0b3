//! Keyed ledger store. The only place account state and pool state are read
//! from or written to.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{ContractError, CreditData, LendingPolicy, LoanRecord};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const ACCOUNT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const ACCOUNT_LIFETIME_THRESHOLD: u32 = ACCOUNT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// Lending asset (SEP-41 token) address.
    Token,
    /// Current `LendingPolicy`.
    Policy,
    /// Pool liquidity available for disbursement.
    PoolBalance,
    /// Per-account credit statistics.
    Credit(Address),
    /// Per-account loan record.
    Loan(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_account_key(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, ACCOUNT_LIFETIME_THRESHOLD, ACCOUNT_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn read_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn read_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(ContractError::NotInitialized)
}

pub fn write_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
}

pub fn read_policy(env: &Env) -> Result<LendingPolicy, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Policy)
        .ok_or(ContractError::NotInitialized)
}

pub fn write_policy(env: &Env, policy: &LendingPolicy) {
    env.storage().instance().set(&DataKey::Policy, policy);
}

pub fn read_pool_balance(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::PoolBalance)
        .unwrap_or(0)
}

pub fn write_pool_balance(env: &Env, balance: i128) {
    env.storage().instance().set(&DataKey::PoolBalance, &balance);
}

/// Credit data for `account`, or a fresh zeroed record on first contact.
pub fn read_credit(env: &Env, account: &Address) -> CreditData {
    env.storage()
        .persistent()
        .get(&DataKey::Credit(account.clone()))
        .unwrap_or_default()
}

pub fn has_credit(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Credit(account.clone()))
}

pub fn write_credit(env: &Env, account: &Address, credit: &CreditData) {
    let key = DataKey::Credit(account.clone());
    env.storage().persistent().set(&key, credit);
    bump_account_key(env, &key);
}

pub fn read_loan(env: &Env, account: &Address) -> Option<LoanRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Loan(account.clone()))
}

pub fn write_loan(env: &Env, account: &Address, loan: &LoanRecord) {
    let key = DataKey::Loan(account.clone());
    env.storage().persistent().set(&key, loan);
    bump_account_key(env, &key);
}
