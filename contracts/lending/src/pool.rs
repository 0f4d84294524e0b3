//! Fund pool: custody of the lending asset.
//!
//! `available` is tracked in instance storage rather than read back from the
//! token balance, so tokens sent to the contract outside `deposit` or
//! `collect` never become lendable. The ledger entry is updated before the
//! token call in every path.

use soroban_sdk::{log, token, Address, Env};

use crate::storage;
use crate::types::ContractError;

fn token_client(env: &Env) -> Result<token::Client<'_>, ContractError> {
    let token_address = storage::read_token(env)?;
    Ok(token::Client::new(env, &token_address))
}

fn credit(env: &Env, amount: i128) -> Result<i128, ContractError> {
    let available = storage::read_pool_balance(env)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    storage::write_pool_balance(env, available);
    Ok(available)
}

fn debit(env: &Env, amount: i128) -> Result<i128, ContractError> {
    let available = storage::read_pool_balance(env);
    if amount > available {
        log!(env, "insufficient pool liquidity", available, amount);
        return Err(ContractError::InsufficientPoolLiquidity);
    }
    let available = available - amount;
    storage::write_pool_balance(env, available);
    Ok(available)
}

pub fn available(env: &Env) -> i128 {
    storage::read_pool_balance(env)
}

/// Moves `amount` from `from` into the pool. Returns the new available balance.
pub fn deposit(env: &Env, from: &Address, amount: i128) -> Result<i128, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let client = token_client(env)?;
    let available = credit(env, amount)?;
    client.transfer(from, &env.current_contract_address(), &amount);
    Ok(available)
}

/// Moves `amount` out of the pool to `to`. Returns the new available balance.
pub fn withdraw(env: &Env, to: &Address, amount: i128) -> Result<i128, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let client = token_client(env)?;
    let available = debit(env, amount)?;
    client.transfer(&env.current_contract_address(), to, &amount);
    Ok(available)
}

pub fn disburse(env: &Env, borrower: &Address, amount: i128) -> Result<i128, ContractError> {
    withdraw(env, borrower, amount)
}

pub fn collect(env: &Env, borrower: &Address, amount: i128) -> Result<i128, ContractError> {
    deposit(env, borrower, amount)
}
