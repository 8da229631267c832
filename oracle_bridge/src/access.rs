//! Two-step ownership: the owner proposes, the candidate accepts. Nothing
//! changes hands until the candidate proves it controls the new address.

use soroban_sdk::{Address, Env};

use crate::events::{self, BridgeEvents, EventCategory, EventPriority};
use crate::{storage, Error};

/// Authenticate `caller` and check it is the current owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let owner = storage::owner(env)?;
    if owner != *caller {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn propose_owner(env: &Env, caller: &Address, candidate: &Address) -> Result<(), Error> {
    require_owner(env, caller)?;

    // The bridge itself can never sign an acceptance.
    if candidate == caller || *candidate == env.current_contract_address() {
        return Err(Error::InvalidArgument);
    }

    storage::extend_instance_ttl(env);
    storage::set_pending_owner(env, candidate);

    BridgeEvents::emit(
        env,
        EventCategory::Access,
        EventPriority::Medium,
        events::OWNER_PROPOSED,
        (caller.clone(), candidate.clone()),
    );
    Ok(())
}

pub fn accept_ownership(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let previous = storage::owner(env)?;

    match storage::pending_owner(env) {
        Some(pending) if pending == *caller => {}
        _ => return Err(Error::Unauthorized),
    }

    storage::extend_instance_ttl(env);
    storage::set_owner(env, caller);
    storage::clear_pending_owner(env);

    BridgeEvents::emit(
        env,
        EventCategory::Access,
        EventPriority::High,
        events::OWNER_ACCEPTED,
        (previous, caller.clone()),
    );
    Ok(())
}
