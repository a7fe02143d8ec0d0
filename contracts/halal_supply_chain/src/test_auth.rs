extern crate std;

use soroban_sdk::{
    testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation},
    Address, Env, IntoVal, String, Symbol, Val, Vec,
};

use crate::{HalalSupplyChain, HalalSupplyChainClient, Role, StatusPolicy};

fn setup() -> (Env, HalalSupplyChainClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(HalalSupplyChain, ());
    let client = HalalSupplyChainClient::new(&env, &contract_id);
    (env, client)
}

fn s(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

/// The last top-level call required exactly `caller`'s signature over
/// `function(args)` and nothing else.
fn assert_signed_by(
    env: &Env,
    client: &HalalSupplyChainClient,
    caller: &Address,
    function: &str,
    args: Vec<Val>,
) {
    assert_eq!(
        env.auths(),
        std::vec![(
            caller.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    client.address.clone(),
                    Symbol::new(env, function),
                    args,
                )),
                sub_invocations: std::vec![],
            }
        )]
    );
}

#[test]
fn test_init_without_signature_fails() {
    let env = Env::default();
    let contract_id = env.register(HalalSupplyChain, ());
    let client = HalalSupplyChainClient::new(&env, &contract_id);
    let admin = Address::generate(&env);

    assert!(client.try_init(&admin).is_err());
    assert_eq!(client.admin(), None);
}

#[test]
fn test_admin_calls_require_admin_signature() {
    let (env, client) = setup();
    let admin = Address::generate(&env);
    let producer = Address::generate(&env);

    client.init(&admin);
    assert_signed_by(&env, &client, &admin, "init", (admin.clone(),).into_val(&env));

    client.assign_role(&admin, &producer, &Role::Producer);
    assert_signed_by(
        &env,
        &client,
        &admin,
        "assign_role",
        (admin.clone(), producer.clone(), Role::Producer).into_val(&env),
    );

    client.set_status_policy(&admin, &StatusPolicy::DownstreamOnly);
    assert_signed_by(
        &env,
        &client,
        &admin,
        "set_status_policy",
        (admin.clone(), StatusPolicy::DownstreamOnly).into_val(&env),
    );
}

#[test]
fn test_batch_calls_require_caller_signature() {
    let (env, client) = setup();
    let admin = Address::generate(&env);
    let producer = Address::generate(&env);
    let authority = Address::generate(&env);
    client.init(&admin);
    client.assign_role(&admin, &producer, &Role::Producer);
    client.assign_role(&admin, &authority, &Role::HalalAuthority);

    let id = s(&env, "BATCH-AUTH");
    let product = s(&env, "Lamb");
    client.create_batch(&producer, &id, &product);
    assert_signed_by(
        &env,
        &client,
        &producer,
        "create_batch",
        (producer.clone(), id.clone(), product.clone()).into_val(&env),
    );

    let status = s(&env, "Packed");
    client.update_status(&producer, &id, &status);
    assert_signed_by(
        &env,
        &client,
        &producer,
        "update_status",
        (producer.clone(), id.clone(), status.clone()).into_val(&env),
    );

    client.transfer_batch(&producer, &id, &authority);
    assert_signed_by(
        &env,
        &client,
        &producer,
        "transfer_batch",
        (producer.clone(), id.clone(), authority.clone()).into_val(&env),
    );

    let cert = s(&env, "QmCert");
    client.set_halal_certificate(&authority, &id, &cert);
    assert_signed_by(
        &env,
        &client,
        &authority,
        "set_halal_certificate",
        (authority.clone(), id.clone(), cert.clone()).into_val(&env),
    );
}
