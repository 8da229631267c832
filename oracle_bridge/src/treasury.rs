use soroban_sdk::{token::TokenClient, Address, Env};

use crate::events::{self, BridgeEvents, EventCategory, EventPriority};
use crate::{access, storage, Error};

/// Read-through to the token contract's ledger; nothing is mirrored locally.
pub fn balance(env: &Env) -> Result<i128, Error> {
    let config = storage::config(env)?;
    Ok(TokenClient::new(env, &config.token).balance(&env.current_contract_address()))
}

fn committed(env: &Env) -> i128 {
    storage::pending_request(env)
        .map(|request| request.oracle_fee)
        .unwrap_or(0)
}

pub fn withdrawable(env: &Env) -> Result<i128, Error> {
    Ok((balance(env)? - committed(env)).max(0))
}

pub fn withdraw(env: &Env, caller: &Address) -> Result<i128, Error> {
    access::require_owner(env, caller)?;

    let amount = withdrawable(env)?;
    if amount == 0 {
        return Ok(0);
    }

    let config = storage::config(env)?;
    storage::extend_instance_ttl(env);
    TokenClient::new(env, &config.token).transfer(&env.current_contract_address(), caller, &amount);

    BridgeEvents::emit(
        env,
        EventCategory::Transaction,
        EventPriority::High,
        events::WITHDRAWN,
        (caller.clone(), amount),
    );
    Ok(amount)
}
