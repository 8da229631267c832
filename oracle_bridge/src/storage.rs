use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::{BridgeConfig, Error, FeeSchedule, PendingRequest};

// Storage TTL constants matching the other contracts in the workspace
const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const CONFIG: Symbol = symbol_short!("CONFIG");
const FEES: Symbol = symbol_short!("FEES");
const PENDING_REQUEST: Symbol = symbol_short!("PEND_REQ");
const NONCE: Symbol = symbol_short!("NONCE");
const LATEST_RESULT: Symbol = symbol_short!("RESULT");

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&OWNER)
}

pub fn owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(Error::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, candidate: &Address) {
    env.storage().instance().set(&PENDING_OWNER, candidate);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

pub fn config(env: &Env) -> Result<BridgeConfig, Error> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &BridgeConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn fees(env: &Env) -> Result<FeeSchedule, Error> {
    env.storage()
        .instance()
        .get(&FEES)
        .ok_or(Error::NotInitialized)
}

pub fn set_fees(env: &Env, fees: &FeeSchedule) {
    env.storage().instance().set(&FEES, fees);
}

pub fn pending_request(env: &Env) -> Option<PendingRequest> {
    env.storage().instance().get(&PENDING_REQUEST)
}

pub fn set_pending_request(env: &Env, request: &PendingRequest) {
    env.storage().instance().set(&PENDING_REQUEST, request);
}

pub fn clear_pending_request(env: &Env) {
    env.storage().instance().remove(&PENDING_REQUEST);
}

/// Returns the nonce for the next request and advances the counter.
pub fn take_nonce(env: &Env) -> u64 {
    let nonce: u64 = env.storage().instance().get(&NONCE).unwrap_or(0);
    env.storage().instance().set(&NONCE, &(nonce + 1));
    nonce
}

pub fn latest_result(env: &Env) -> Result<String, Error> {
    env.storage()
        .instance()
        .get(&LATEST_RESULT)
        .ok_or(Error::NotInitialized)
}

pub fn set_latest_result(env: &Env, result: &String) {
    env.storage().instance().set(&LATEST_RESULT, result);
}
