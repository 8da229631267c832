use soroban_sdk::{log, Address, Bytes, BytesN, Env};

use crate::events::{self, BridgeEvents, EventCategory, EventPriority};
use crate::{correlator, fees, storage, Error, GateState};

/// Upper bound on the payload stored with a pending request.
pub const MAX_PAYLOAD_LEN: u32 = 256;

/// Validate a `transfer_and_call` notification and issue the oracle request.
///
/// Trust comes from who is calling, never from the payload: `from_token` must
/// be the configured token and must also be the direct invoker, which is what
/// `require_auth` on a contract address checks.
pub fn on_token_transfer(
    env: &Env,
    from_token: Address,
    payer: Address,
    amount: i128,
    payload: Bytes,
) -> Result<BytesN<32>, Error> {
    let config = storage::config(env)?;
    if from_token != config.token {
        log!(env, "payment rejected: untrusted token", from_token);
        return Err(Error::UnauthorizedCaller);
    }
    from_token.require_auth();

    if amount < 0 || payload.len() > MAX_PAYLOAD_LEN {
        return Err(Error::InvalidArgument);
    }
    let price = fees::total_price(env)?;
    if amount < price {
        return Err(Error::InsufficientPayment);
    }

    storage::extend_instance_ttl(env);
    BridgeEvents::emit(
        env,
        EventCategory::Transaction,
        EventPriority::Low,
        events::PAYMENT_ACCEPTED,
        (payer.clone(), amount),
    );

    correlator::issue_request(env, &config, payer, payload)
}

pub fn state(env: &Env) -> Result<GateState, Error> {
    storage::owner(env)?;
    Ok(match storage::pending_request(env) {
        Some(_) => GateState::RequestIssued,
        None => GateState::Idle,
    })
}
