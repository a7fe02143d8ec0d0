extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{
    BatchCertified, BatchCreated, BatchTransferred, Initialized, RoleAssigned, StatusPolicyChanged,
    StatusUpdated,
};
use crate::{HalalSupplyChain, HalalSupplyChainClient, Role, StatusPolicy};

fn setup() -> (Env, HalalSupplyChainClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(HalalSupplyChain, ());
    let client = HalalSupplyChainClient::new(&env, &contract_id);
    (env, client)
}

fn setup_with_init() -> (Env, HalalSupplyChainClient<'static>, Address) {
    let (env, client) = setup();
    let admin = Address::generate(&env);
    client.init(&admin);
    (env, client, admin)
}

/// Admin plus a producer, halal authority and distributor, and one batch
/// already handed to the authority.
fn setup_batch_with_authority(
    id: &str,
) -> (Env, HalalSupplyChainClient<'static>, Address, Address, Address, String) {
    let (env, client, admin) = setup_with_init();
    let producer = Address::generate(&env);
    let authority = Address::generate(&env);
    let distributor = Address::generate(&env);
    client.assign_role(&admin, &producer, &Role::Producer);
    client.assign_role(&admin, &authority, &Role::HalalAuthority);
    client.assign_role(&admin, &distributor, &Role::Distributor);

    let batch_id = String::from_str(&env, id);
    client.create_batch(&producer, &batch_id, &String::from_str(&env, "Dates"));
    client.transfer_batch(&producer, &batch_id, &authority);
    (env, client, producer, authority, distributor, batch_id)
}

#[test]
fn test_initialized_event() {
    let (env, client) = setup();
    let admin = Address::generate(&env);
    client.init(&admin);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("init").into_val(&env),
        admin.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Initialized = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, Initialized { admin });
}

#[test]
fn test_role_assigned_event() {
    let (env, client, admin) = setup_with_init();
    let producer = Address::generate(&env);
    client.assign_role(&admin, &producer, &Role::Producer);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("role_set"), target)
    let expected_topics = vec![
        &env,
        symbol_short!("role_set").into_val(&env),
        producer.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RoleAssigned = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RoleAssigned {
            target: producer,
            role: Role::Producer,
            by: admin,
        }
    );
}

#[test]
fn test_status_policy_event() {
    let (env, client, admin) = setup_with_init();
    client.set_status_policy(&admin, &StatusPolicy::DownstreamOnly);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&env, symbol_short!("policy").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: StatusPolicyChanged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        StatusPolicyChanged {
            policy: StatusPolicy::DownstreamOnly,
            by: admin,
        }
    );
}

#[test]
fn test_batch_created_event() {
    let (env, client, admin) = setup_with_init();
    env.ledger().with_mut(|li| li.timestamp = 1_704_067_200);
    let producer = Address::generate(&env);
    client.assign_role(&admin, &producer, &Role::Producer);

    let batch_id = String::from_str(&env, "BATCH-001");
    let product_name = String::from_str(&env, "Halal Beef");
    client.create_batch(&producer, &batch_id, &product_name);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), batch_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        batch_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: BatchCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        BatchCreated {
            batch_id,
            product_name,
            producer,
            created_at: 1_704_067_200,
        }
    );
}

#[test]
fn test_batch_transferred_event() {
    let (env, client, producer, authority, _distributor, batch_id) =
        setup_batch_with_authority("BATCH-SEQ");

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("transfer").into_val(&env),
        batch_id.into_val(&env),
    ];
    assert_eq!(last_event.0, client.address);
    assert_eq!(last_event.1, expected_topics);

    let event_data: BatchTransferred = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        BatchTransferred {
            batch_id,
            from: producer,
            to: authority,
            to_role: Role::HalalAuthority,
        }
    );
}

#[test]
fn test_batch_certified_event() {
    let (env, client, _producer, authority, _distributor, batch_id) =
        setup_batch_with_authority("BATCH-CERT");
    let cert_hash = String::from_str(&env, "QmCertHash");
    client.set_halal_certificate(&authority, &batch_id, &cert_hash);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("certified").into_val(&env),
        batch_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: BatchCertified = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        BatchCertified {
            batch_id,
            authority,
            cert_hash,
        }
    );
}

#[test]
fn test_status_updated_event() {
    let (env, client, _producer, authority, distributor, batch_id) =
        setup_batch_with_authority("BATCH-STATUS");
    client.transfer_batch(&authority, &batch_id, &distributor);
    let status = String::from_str(&env, "In transit");
    client.update_status(&distributor, &batch_id, &status);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("status").into_val(&env),
        batch_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: StatusUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        StatusUpdated {
            batch_id,
            owner: distributor,
            status,
        }
    );
}

#[test]
fn test_rejected_call_emits_nothing() {
    let (env, client, producer, _authority, distributor, batch_id) =
        setup_batch_with_authority("BATCH-QUIET");

    // The producer no longer owns the batch; this transfer must fail.
    let result = client.try_transfer_batch(&producer, &batch_id, &distributor);
    assert!(result.is_err());

    let all_events = env.events().all();
    for event in all_events.iter() {
        let topic: soroban_sdk::Symbol = event.1.get(0).unwrap().try_into_val(&env).unwrap();
        if topic == symbol_short!("transfer") {
            let data: BatchTransferred = event.2.try_into_val(&env).unwrap();
            assert_ne!(data.to, distributor, "rejected transfer was published");
        }
    }
}
