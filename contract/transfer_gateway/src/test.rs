#![cfg(test)]
use super::*;
use soroban_sdk::{contract, contractimpl, symbol_short, testutils::Address as _, token, Address, Env};

// Stands in for a campaign registry and remembers the last credit it received.
#[contract]
pub struct RecordingLedger;

#[contractimpl]
impl RecordingLedger {
    pub fn donate(env: Env, gateway: Address, campaign_id: u64, donor: Address, amount: i128) {
        env.storage()
            .instance()
            .set(&symbol_short!("last"), &(gateway, campaign_id, donor, amount));
    }

    pub fn last(env: Env) -> Option<(Address, u64, Address, i128)> {
        env.storage().instance().get(&symbol_short!("last"))
    }
}

struct Setup<'a> {
    env: Env,
    gateway: TransferGatewayClient<'a>,
    ledger: RecordingLedgerClient<'a>,
    token: token::Client<'a>,
    admin: Address,
    donor: Address,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();

    let token_admin = Address::generate(&env);
    let token_id = env.register_stellar_asset_contract_v2(token_admin).address();
    let donor = Address::generate(&env);
    token::StellarAssetClient::new(&env, &token_id).mint(&donor, &1000);

    let admin = Address::generate(&env);
    let gateway = TransferGatewayClient::new(&env, &env.register(TransferGateway, ()));
    gateway.initialize(&admin, &token_id);
    let ledger = RecordingLedgerClient::new(&env, &env.register(RecordingLedger, ()));
    let token = token::Client::new(&env, &token_id);

    Setup {
        env,
        gateway,
        ledger,
        token,
        admin,
        donor,
    }
}

#[test]
fn test_initialize_once() {
    let s = setup();

    assert_eq!(s.gateway.token(), s.token.address);
    assert_eq!(s.gateway.admin(), s.admin);
    let result = s
        .gateway
        .try_initialize(&Address::generate(&s.env), &Address::generate(&s.env));
    assert_eq!(result, Err(Ok(GatewayError::AlreadyInitialized)));
    assert_eq!(s.gateway.token(), s.token.address);
}

#[test]
fn test_initialize_requires_admin_signature() {
    let env = Env::default();
    let gateway = TransferGatewayClient::new(&env, &env.register(TransferGateway, ()));
    let admin = Address::generate(&env);
    let token_id = Address::generate(&env);

    assert!(gateway.try_initialize(&admin, &token_id).is_err());
    assert_eq!(gateway.try_token(), Err(Ok(GatewayError::NotInitialized)));

    env.mock_all_auths();
    gateway.initialize(&admin, &token_id);
    assert_eq!(gateway.token(), token_id);
}

#[test]
fn test_uninitialized_gateway_rejects_donations() {
    let env = Env::default();
    env.mock_all_auths();
    let gateway = TransferGatewayClient::new(&env, &env.register(TransferGateway, ()));
    let campaign = CampaignRef {
        registry: Address::generate(&env),
        id: 1,
    };

    let result = gateway.try_donate(&Address::generate(&env), &campaign, &10);
    assert_eq!(result, Err(Ok(GatewayError::NotInitialized)));
}

#[test]
fn test_donate_pulls_allowance_and_credits_campaign() {
    let s = setup();
    let expiration = s.env.ledger().sequence() + 1000;
    s.token.approve(&s.donor, &s.gateway.address, &500, &expiration);

    let campaign = CampaignRef {
        registry: s.ledger.address.clone(),
        id: 7,
    };
    s.gateway.donate(&s.donor, &campaign, &300);

    assert_eq!(s.token.balance(&s.donor), 700);
    assert_eq!(s.token.balance(&s.ledger.address), 300);
    assert_eq!(s.token.balance(&s.gateway.address), 0);
    assert_eq!(s.token.allowance(&s.donor, &s.gateway.address), 200);
    assert_eq!(
        s.ledger.last(),
        Some((s.gateway.address.clone(), 7, s.donor.clone(), 300))
    );
}

#[test]
fn test_donate_fails_without_allowance() {
    let s = setup();
    let campaign = CampaignRef {
        registry: s.ledger.address.clone(),
        id: 1,
    };

    let result = s.gateway.try_donate(&s.donor, &campaign, &100);

    assert!(result.is_err());
    assert_eq!(s.token.balance(&s.donor), 1000);
    assert_eq!(s.ledger.last(), None);
}

#[test]
fn test_donate_fails_beyond_balance() {
    let s = setup();
    let expiration = s.env.ledger().sequence() + 1000;
    s.token.approve(&s.donor, &s.gateway.address, &5000, &expiration);
    let campaign = CampaignRef {
        registry: s.ledger.address.clone(),
        id: 1,
    };

    assert!(s.gateway.try_donate(&s.donor, &campaign, &1001).is_err());
    assert_eq!(s.token.balance(&s.donor), 1000);
    assert_eq!(s.ledger.last(), None);
}

#[test]
fn test_donate_rejects_negative_amount() {
    let s = setup();
    let campaign = CampaignRef {
        registry: s.ledger.address.clone(),
        id: 1,
    };

    let result = s.gateway.try_donate(&s.donor, &campaign, &-1);
    assert_eq!(result, Err(Ok(GatewayError::InvalidAmount)));
}
