use soroban_sdk::{symbol_short, Env, IntoVal, Symbol, Val};

pub const NAMESPACE: Symbol = symbol_short!("bridge");

pub const INITIALIZED: Symbol = symbol_short!("init");
pub const OWNER_PROPOSED: Symbol = symbol_short!("own_prop");
pub const OWNER_ACCEPTED: Symbol = symbol_short!("own_acc");
pub const ORACLE_FEE_SET: Symbol = symbol_short!("fee_orc");
pub const SERVICE_FEE_SET: Symbol = symbol_short!("fee_svc");
pub const ORACLE_SET: Symbol = symbol_short!("oracle");
pub const PAYMENT_ACCEPTED: Symbol = symbol_short!("paid");
pub const REQUEST_SENT: Symbol = symbol_short!("req_sent");
pub const RESULT_UPDATED: Symbol = symbol_short!("res_upd");
pub const WITHDRAWN: Symbol = symbol_short!("withdrawn");

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum EventCategory {
    Transaction = 0,
    State = 1,
    Access = 2,
    System = 3,
}

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum EventPriority {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl EventCategory {
    pub fn to_u32(self) -> u32 {
        self as u32
    }
}
impl EventPriority {
    pub fn to_u32(self) -> u32 {
        self as u32
    }
}

pub struct BridgeEvents;

impl BridgeEvents {
    /// Publish under `(bridge, category, priority, action)` so off-chain
    /// listeners can filter on any prefix of the topic list.
    pub fn emit<T: IntoVal<Env, Val>>(
        e: &Env,
        category: EventCategory,
        priority: EventPriority,
        action: Symbol,
        data: T,
    ) {
        let topics = (NAMESPACE, category.to_u32(), priority.to_u32(), action);
        e.events().publish(topics, data);
    }
}
