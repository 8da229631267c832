#![cfg(test)]

use oracle_bridge::{OracleBridge, OracleBridgeClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{symbol_short, testutils::Events, Address, Env, Symbol, TryFromVal, Val, Vec};

fn decode_topics(e: &Env, topics: &Vec<Val>) -> (Symbol, u32, u32, Symbol) {
    (
        Symbol::try_from_val(e, &topics.get(0).unwrap()).unwrap(),
        u32::try_from_val(e, &topics.get(1).unwrap()).unwrap(),
        u32::try_from_val(e, &topics.get(2).unwrap()).unwrap(),
        Symbol::try_from_val(e, &topics.get(3).unwrap()).unwrap(),
    )
}

fn last_topics(e: &Env) -> (Symbol, u32, u32, Symbol) {
    let all_events = e.events().all();
    assert!(all_events.len() > 0, "No events were emitted!");
    let last_event = all_events.last().unwrap();
    decode_topics(e, &last_event.1)
}

#[test]
fn test_admin_notification_flow() {
    let e = Env::default();
    e.mock_all_auths();

    let contract_id = e.register_contract(None, OracleBridge);
    let client = OracleBridgeClient::new(&e, &contract_id);
    let owner = Address::generate(&e);
    let token_admin = Address::generate(&e);
    let token_id = e.register_stellar_asset_contract_v2(token_admin).address();
    let oracle = Address::generate(&e);

    client.initialize(&owner, &token_id, &oracle, &symbol_short!("fact_job"));
    let (namespace, category, _, action) = last_topics(&e);
    assert_eq!(namespace, symbol_short!("bridge"));
    assert_eq!(category, 3u32); // Category: System (3)
    assert_eq!(action, symbol_short!("init"));

    // Fee change
    client.set_oracle_fee(&owner, &2_000_000);
    let (_, category, _, action) = last_topics(&e);
    assert_eq!(category, 1u32); // Category: State (1)
    assert_eq!(action, symbol_short!("fee_orc"));

    client.set_service_fee(&owner, &0);
    let (_, _, _, action) = last_topics(&e);
    assert_eq!(action, symbol_short!("fee_svc"));

    std::println!("✅ Fee Events Verified");

    // Ownership handover
    let next_owner = Address::generate(&e);
    client.propose_owner(&owner, &next_owner);
    let (_, category, _, action) = last_topics(&e);
    assert_eq!(category, 2u32); // Category: Access (2)
    assert_eq!(action, symbol_short!("own_prop"));

    client.accept_ownership(&next_owner);
    let (_, category, priority, action) = last_topics(&e);
    assert_eq!(category, 2u32);
    assert_eq!(priority, 2u32); // Priority: High (2)
    assert_eq!(action, symbol_short!("own_acc"));

    std::println!("✅ Ownership Events Verified");

    // Withdrawal
    StellarAssetClient::new(&e, &token_id).mint(&contract_id, &7_0000000);
    client.withdraw(&next_owner);
    let (_, category, priority, action) = last_topics(&e);
    assert_eq!(category, 0u32); // Category: Transaction (0)
    assert_eq!(priority, 2u32);
    assert_eq!(action, symbol_short!("withdrawn"));

    std::println!("✅ Withdrawal Event Verified");
}

#[test]
fn test_rejected_call_emits_nothing() {
    let e = Env::default();
    e.mock_all_auths();

    let contract_id = e.register_contract(None, OracleBridge);
    let client = OracleBridgeClient::new(&e, &contract_id);
    let owner = Address::generate(&e);
    let token_admin = Address::generate(&e);
    let token_id = e.register_stellar_asset_contract_v2(token_admin).address();
    let oracle = Address::generate(&e);
    client.initialize(&owner, &token_id, &oracle, &symbol_short!("fact_job"));

    let stranger = Address::generate(&e);
    let result = client.try_set_oracle_fee(&stranger, &1);
    assert!(result.is_err());
    assert_eq!(client.get_oracle_fee(), 1_000_000);

    // Withdrawing an empty balance is a silent no-op
    assert_eq!(client.withdraw(&owner), 0);
    for event in e.events().all().iter() {
        if event.0 != contract_id {
            continue;
        }
        let (_, _, _, action) = decode_topics(&e, &event.1);
        assert_ne!(action, symbol_short!("withdrawn"));
    }
}
