//! Request/fulfil correlation.
//!
//! Issuing and fulfilling are two unrelated invocations. The only link between
//! them is the request id stored as the pending request: a callback applies
//! only when it carries that id, and clearing it on success makes a replay of
//! the same id fail.
//!
//! The oracle fee is committed when the request is issued and paid out when
//! the operator delivers. Paying at issue time is not possible because the
//! token contract is still on the call stack inside `on_token_transfer` and
//! Soroban rejects contract re-entry.

use soroban_sdk::{
    log, symbol_short, token::TokenClient, xdr::ToXdr, Address, Bytes, BytesN, Env, String,
    Symbol,
};

use crate::events::{self, BridgeEvents, EventCategory, EventPriority};
use crate::{
    access, storage, BridgeConfig, Error, OracleOperatorClient, PendingRequest,
    ResultUpdatedEvent,
};

/// Entry point the operator invokes with the result.
pub const CALLBACK: Symbol = symbol_short!("fulfill");

/// `sha256(xdr(bridge address) || nonce)`, unique per bridge and request.
fn derive_request_id(env: &Env, nonce: u64) -> BytesN<32> {
    let mut preimage = env.current_contract_address().to_xdr(env);
    preimage.append(&Bytes::from_array(env, &nonce.to_be_bytes()));
    env.crypto().sha256(&preimage).into()
}

pub fn issue_request(
    env: &Env,
    config: &BridgeConfig,
    payer: Address,
    payload: Bytes,
) -> Result<BytesN<32>, Error> {
    if storage::pending_request(env).is_some() {
        return Err(Error::RequestAlreadyOutstanding);
    }

    let oracle_fee = storage::fees(env)?.oracle_fee;
    let request_id = derive_request_id(env, storage::take_nonce(env));

    storage::set_pending_request(
        env,
        &PendingRequest {
            request_id: request_id.clone(),
            requester: payer.clone(),
            payload: payload.clone(),
            oracle_fee,
            issued_at: env.ledger().timestamp(),
        },
    );

    OracleOperatorClient::new(env, &config.oracle).oracle_request(
        &env.current_contract_address(),
        &request_id,
        &config.job_id,
        &CALLBACK,
        &oracle_fee,
        &payload,
    );

    BridgeEvents::emit(
        env,
        EventCategory::Transaction,
        EventPriority::Medium,
        events::REQUEST_SENT,
        (request_id.clone(), payer),
    );
    log!(env, "oracle request issued", request_id);

    Ok(request_id)
}

pub fn fulfill(
    env: &Env,
    caller: Address,
    request_id: BytesN<32>,
    result: String,
) -> Result<(), Error> {
    let config = storage::config(env)?;
    if caller != config.oracle {
        return Err(Error::UnauthorizedCaller);
    }
    caller.require_auth();

    let pending = match storage::pending_request(env) {
        Some(pending) if pending.request_id == request_id => pending,
        _ => {
            log!(env, "callback rejected: stale request", request_id);
            return Err(Error::UnknownOrStaleRequest);
        }
    };

    storage::extend_instance_ttl(env);
    storage::set_latest_result(env, &result);
    storage::clear_pending_request(env);

    if pending.oracle_fee > 0 {
        TokenClient::new(env, &config.token).transfer(
            &env.current_contract_address(),
            &caller,
            &pending.oracle_fee,
        );
    }

    BridgeEvents::emit(
        env,
        EventCategory::State,
        EventPriority::High,
        events::RESULT_UPDATED,
        ResultUpdatedEvent {
            request_id,
            result,
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}

/// Swap the operator or job (owner only). An outstanding request keeps the
/// operator it was sent to, so the swap waits until it is fulfilled.
pub fn set_operator(
    env: &Env,
    caller: &Address,
    oracle: Address,
    job_id: Symbol,
) -> Result<(), Error> {
    access::require_owner(env, caller)?;
    if storage::pending_request(env).is_some() {
        return Err(Error::RequestAlreadyOutstanding);
    }

    let mut config = storage::config(env)?;
    config.oracle = oracle.clone();
    config.job_id = job_id.clone();

    storage::extend_instance_ttl(env);
    storage::set_config(env, &config);

    BridgeEvents::emit(
        env,
        EventCategory::System,
        EventPriority::High,
        events::ORACLE_SET,
        (oracle, job_id),
    );
    Ok(())
}
