#![no_std]

//! # Oracle Bridge
//!
//! A paid request/fulfil bridge between token holders and an off-chain oracle
//! network. A payer sends tokens with a payload through the token contract's
//! `transfer_and_call`; the token contract calls back into
//! [`OracleBridge::on_token_transfer`], which checks the fee and forwards the
//! payload to the oracle operator. Some time later the operator answers
//! through [`OracleBridge::fulfill`] and the result becomes readable via
//! [`OracleBridge::get_latest_result`].
//!
//! ## Request lifecycle
//!
//! 1. `on_token_transfer` accepts calls from the configured token contract only
//! 2. The amount must cover `oracle_fee + service_fee`
//! 3. A request id is derived, stored as the single outstanding request and
//!    dispatched to the operator together with the callback name
//! 4. The operator calls `fulfill` with the same id; any other id is rejected
//!
//! Only one request is outstanding at a time. A payment that arrives while a
//! request is in flight is rejected with [`Error::RequestAlreadyOutstanding`].
//!
//! ## Atomicity
//!
//! Every entry point returns `Result`. An `Err` reverts the whole invocation,
//! including the token movement that triggered `on_token_transfer` and any
//! events already published.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use oracle_bridge::{OracleBridge, OracleBridgeClient};
//!
//! bridge.initialize(&owner, &token_id, &operator_id, &job_id);
//! let price = bridge.get_total_price(); // 1_100_000 = 0.11 tokens (7 decimals)
//! token.transfer_and_call(&payer, &bridge_id, &price, &payload);
//! ```

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype, Address, Bytes, BytesN,
    Env, String, Symbol,
};

mod access;
mod correlator;
mod events;
mod fees;
mod gate;
mod storage;
mod treasury;

pub use correlator::CALLBACK;
pub use fees::{DEFAULT_ORACLE_FEE, DEFAULT_SERVICE_FEE};
pub use gate::MAX_PAYLOAD_LEN;


const CONTRACT_VERSION: u32 = 1;

/// Result stored at initialisation, before any request has been fulfilled.
pub const SEED_RESULT: &str = "Owning a cat is actually proven to be beneficial for your health.";

// ============================================================================
// Collaborator Interfaces
// ============================================================================

/// Oracle operator contract client interface
///
/// The operator accepts a paid job and later invokes `callback` on `sender`
/// with `(operator, request_id, result)`, authorising as itself.
#[contractclient(name = "OracleOperatorClient")]
pub trait OracleOperatorTrait {
    /// Queue an off-chain job
    ///
    /// # Arguments
    /// * `sender` - Contract to call back on completion
    /// * `request_id` - Correlation id the callback must carry
    /// * `job_id` - Operator job to run
    /// * `callback` - Function name to invoke on `sender`
    /// * `payment` - Oracle fee committed for this job
    /// * `payload` - Requester supplied input, passed through unchanged
    fn oracle_request(
        env: Env,
        sender: Address,
        request_id: BytesN<32>,
        job_id: Symbol,
        callback: Symbol,
        payment: i128,
        payload: Bytes,
    );
}

// ============================================================================
// Types
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Caller is not the owner (or not the pending owner when accepting)
    Unauthorized = 1,
    /// Caller is not the trusted token or oracle contract
    UnauthorizedCaller = 2,
    /// Degenerate input: self-transfer of ownership, negative amount, oversized payload
    InvalidArgument = 3,
    /// Attached amount is below the total price
    InsufficientPayment = 4,
    /// A request is already in flight
    RequestAlreadyOutstanding = 5,
    /// Callback does not match the outstanding request
    UnknownOrStaleRequest = 6,
    NotInitialized = 7,
    AlreadyInitialized = 8,
    /// Fee change would make the total price unrepresentable
    FeeOverflow = 9,
}

/// Identities trusted by the bridge, bound at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BridgeConfig {
    /// Token contract whose `transfer_and_call` is the only way in
    pub token: Address,
    /// Oracle operator allowed to call `fulfill`
    pub oracle: Address,
    /// Operator job every request targets
    pub job_id: Symbol,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSchedule {
    /// Paid to the oracle operator when it fulfils a request
    pub oracle_fee: i128,
    /// Kept by the bridge
    pub service_fee: i128,
}

/// The single request awaiting its callback.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingRequest {
    pub request_id: BytesN<32>,
    pub requester: Address,
    pub payload: Bytes,
    /// Oracle fee committed at issue time, released to the operator on fulfilment
    pub oracle_fee: i128,
    pub issued_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum GateState {
    Idle = 0,
    /// Only exists inside a single `on_token_transfer` invocation
    PaymentValidated = 1,
    RequestIssued = 2,
}

/// Event emitted when a correlated callback stores a new result
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultUpdatedEvent {
    pub request_id: BytesN<32>,
    pub result: String,
    pub timestamp: u64,
}

// ============================================================================
// Contract
// ============================================================================

#[contract]
pub struct OracleBridge;

#[contractimpl]
impl OracleBridge {
    /// Initialize the bridge
    ///
    /// # Arguments
    /// * `owner` - Administrator, must authorise
    /// * `token` - Token contract that pays for requests
    /// * `oracle` - Oracle operator contract
    /// * `job_id` - Operator job to request
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        oracle: Address,
        job_id: Symbol,
    ) -> Result<(), Error> {
        owner.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        storage::extend_instance_ttl(&env);
        storage::set_owner(&env, &owner);
        storage::set_config(&env, &BridgeConfig { token, oracle, job_id });
        storage::set_fees(&env, &fees::default_schedule());
        storage::set_latest_result(&env, &String::from_str(&env, SEED_RESULT));

        events::BridgeEvents::emit(
            &env,
            events::EventCategory::System,
            events::EventPriority::Medium,
            events::INITIALIZED,
            owner,
        );
        Ok(())
    }

    /// Contract version for upgrade tracking.
    pub fn get_version(_env: Env) -> u32 {
        CONTRACT_VERSION
    }

    pub fn get_config(env: Env) -> Result<BridgeConfig, Error> {
        storage::config(&env)
    }

    /// Point the bridge at another oracle operator or job (owner only).
    /// Refused while a request is outstanding.
    pub fn set_oracle(
        env: Env,
        caller: Address,
        oracle: Address,
        job_id: Symbol,
    ) -> Result<(), Error> {
        correlator::set_operator(&env, &caller, oracle, job_id)
    }

    // --- Ownership ---

    /// Start a two-step ownership transfer (owner only).
    pub fn propose_owner(env: Env, caller: Address, candidate: Address) -> Result<(), Error> {
        access::propose_owner(&env, &caller, &candidate)
    }

    /// Complete a transfer started by `propose_owner` (pending owner only).
    pub fn accept_ownership(env: Env, caller: Address) -> Result<(), Error> {
        access::accept_ownership(&env, &caller)
    }

    pub fn get_owner(env: Env) -> Result<Address, Error> {
        storage::owner(&env)
    }

    pub fn get_pending_owner(env: Env) -> Result<Option<Address>, Error> {
        storage::owner(&env)?;
        Ok(storage::pending_owner(&env))
    }

    // --- Fees ---

    pub fn set_oracle_fee(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        fees::set_fee(&env, &caller, fees::FeeKind::Oracle, amount)
    }

    pub fn set_service_fee(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        fees::set_fee(&env, &caller, fees::FeeKind::Service, amount)
    }

    /// Price a payment must cover: `oracle_fee + service_fee`.
    pub fn get_total_price(env: Env) -> Result<i128, Error> {
        fees::total_price(&env)
    }

    pub fn get_fee_schedule(env: Env) -> Result<FeeSchedule, Error> {
        storage::fees(&env)
    }

    pub fn get_oracle_fee(env: Env) -> Result<i128, Error> {
        Ok(storage::fees(&env)?.oracle_fee)
    }

    pub fn get_service_fee(env: Env) -> Result<i128, Error> {
        Ok(storage::fees(&env)?.service_fee)
    }

    // --- Requests ---

    /// Token callback: the only way to start an oracle request.
    ///
    /// # Arguments
    /// * `from_token` - Token contract making the call, must be the configured token
    /// * `payer` - Account the tokens came from
    /// * `amount` - Amount already credited to the bridge
    /// * `payload` - Free-form request input forwarded to the oracle
    ///
    /// # Returns
    /// The id of the issued request
    pub fn on_token_transfer(
        env: Env,
        from_token: Address,
        payer: Address,
        amount: i128,
        payload: Bytes,
    ) -> Result<BytesN<32>, Error> {
        gate::on_token_transfer(&env, from_token, payer, amount, payload)
    }

    pub fn get_state(env: Env) -> Result<GateState, Error> {
        gate::state(&env)
    }

    /// Oracle callback carrying the result for `request_id`.
    pub fn fulfill(
        env: Env,
        caller: Address,
        request_id: BytesN<32>,
        result: String,
    ) -> Result<(), Error> {
        correlator::fulfill(&env, caller, request_id, result)
    }

    pub fn get_pending_request(env: Env) -> Result<Option<PendingRequest>, Error> {
        storage::owner(&env)?;
        Ok(storage::pending_request(&env))
    }

    pub fn get_latest_result(env: Env) -> Result<String, Error> {
        storage::latest_result(&env)
    }

    // --- Treasury ---

    /// Token balance of the bridge, read from the token contract.
    pub fn get_balance(env: Env) -> Result<i128, Error> {
        treasury::balance(&env)
    }

    /// Balance minus the oracle fee committed to the outstanding request.
    pub fn get_withdrawable(env: Env) -> Result<i128, Error> {
        treasury::withdrawable(&env)
    }

    /// Send every uncommitted token to the owner (owner only).
    ///
    /// # Returns
    /// Amount transferred, 0 when there was nothing to withdraw
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        treasury::withdraw(&env, &caller)
    }
}
