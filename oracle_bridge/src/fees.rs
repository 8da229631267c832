use soroban_sdk::{Address, Env, Symbol};

use crate::events::{self, BridgeEvents, EventCategory, EventPriority};
use crate::{access, storage, Error, FeeSchedule};

/// 0.1 token at 7 decimals
pub const DEFAULT_ORACLE_FEE: i128 = 1_000_000;
/// 0.01 token at 7 decimals
pub const DEFAULT_SERVICE_FEE: i128 = 100_000;

#[derive(Clone, Copy)]
pub enum FeeKind {
    Oracle,
    Service,
}

impl FeeKind {
    fn event(self) -> Symbol {
        match self {
            FeeKind::Oracle => events::ORACLE_FEE_SET,
            FeeKind::Service => events::SERVICE_FEE_SET,
        }
    }
}

impl FeeSchedule {
    /// `None` when the sum does not fit in an `i128`.
    pub fn total(&self) -> Option<i128> {
        self.oracle_fee.checked_add(self.service_fee)
    }
}

pub fn default_schedule() -> FeeSchedule {
    FeeSchedule {
        oracle_fee: DEFAULT_ORACLE_FEE,
        service_fee: DEFAULT_SERVICE_FEE,
    }
}

pub fn total_price(env: &Env) -> Result<i128, Error> {
    storage::fees(env)?.total().ok_or(Error::FeeOverflow)
}

/// Owner-only fee update. No upper bound beyond keeping the total
/// representable; the owner is trusted with pricing.
pub fn set_fee(env: &Env, caller: &Address, kind: FeeKind, amount: i128) -> Result<(), Error> {
    access::require_owner(env, caller)?;
    if amount < 0 {
        return Err(Error::InvalidArgument);
    }

    let mut fees = storage::fees(env)?;
    let slot = match kind {
        FeeKind::Oracle => &mut fees.oracle_fee,
        FeeKind::Service => &mut fees.service_fee,
    };
    let previous = *slot;
    *slot = amount;

    if fees.total().is_none() {
        return Err(Error::FeeOverflow);
    }

    storage::extend_instance_ttl(env);
    storage::set_fees(env, &fees);

    BridgeEvents::emit(
        env,
        EventCategory::State,
        EventPriority::Medium,
        kind.event(),
        (previous, amount),
    );
    Ok(())
}
