//! Integration tests for the wizard REST surface.
//!
//! Each test spins up an Axum server on a random port with a stub wallet
//! provider and drives the real HTTP contract with reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use veriflow::config::FlowConfig;
use veriflow::error::WalletError;
use veriflow::notify::{Notifier, TracingNotifier};
use veriflow::wallet::{Address, DisconnectedWalletProvider, WalletProvider};
use veriflow::wizard::{WizardManager, WizardRouteState, wizard_routes};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Stub wallet provider handing out a fixed address.
struct StubWallet {
    address: String,
}

#[async_trait]
impl WalletProvider for StubWallet {
    async fn connect(&self) -> Result<Address, WalletError> {
        Address::parse(&self.address)
    }
}

/// Start the service on a random port and return its base URL.
async fn start_server(wallet: Arc<dyn WalletProvider>, kyc_cfg: FlowConfig) -> String {
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let kyc = Arc::new(WizardManager::new(
        kyc_cfg,
        Arc::clone(&wallet),
        Arc::clone(&notifier),
    ));
    let kyb = Arc::new(WizardManager::new(FlowConfig::business(), wallet, notifier));
    let app = wizard_routes(WizardRouteState { kyc, kyb });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post(client: &reqwest::Client, url: &str, body: Value) -> Value {
    let response = client.post(url).json(&body).send().await.unwrap();
    assert!(
        response.status().is_success(),
        "POST {url} failed: {}",
        response.status()
    );
    response.json().await.unwrap()
}

async fn post_empty(client: &reqwest::Client, url: &str) -> Value {
    let response = client.post(url).send().await.unwrap();
    assert!(
        response.status().is_success(),
        "POST {url} failed: {}",
        response.status()
    );
    response.json().await.unwrap()
}

fn adult_dob() -> String {
    format!("{}-01-01", Utc::now().date_naive().year() - 30)
}

async fn set_field(client: &reqwest::Client, base: &str, id: &str, name: &str, value: &str) {
    post(
        client,
        &format!("{base}/api/sessions/{id}/fields"),
        json!({ "name": name, "value": value }),
    )
    .await;
}

#[tokio::test]
async fn kyc_happy_path_reaches_confirmation() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(
            Arc::new(DisconnectedWalletProvider),
            FlowConfig::individual(),
        )
        .await;
        let client = reqwest::Client::new();

        let created = post_empty(&client, &format!("{base}/api/kyc/sessions")).await;
        let id = created["session_id"].as_str().unwrap().to_string();
        assert_eq!(created["state"]["step"], "personal_info");
        assert_eq!(created["progress"]["step_count"], 5);

        let dob = adult_dob();
        for (name, value) in [
            ("first_name", "Jane"),
            ("last_name", "Doe"),
            ("date_of_birth", dob.as_str()),
            ("email", "jane@x.com"),
            ("phone", "+33 612 345 678"),
            ("document_number", "AB123456"),
            ("document_expiry", "2030-01-01"),
        ] {
            set_field(&client, &base, &id, name, value).await;
        }

        for slot in ["id_front", "id_back", "selfie"] {
            let body = post(
                &client,
                &format!("{base}/api/sessions/{id}/documents"),
                json!({ "slot": slot, "file_name": format!("{slot}.jpg") }),
            )
            .await;
            assert_eq!(body["notice"]["severity"], "info");
        }

        post(
            &client,
            &format!("{base}/api/sessions/{id}/wallet"),
            json!({ "address": format!("0x{}", "a".repeat(40)) }),
        )
        .await;

        let expected = ["documents", "selfie", "reward", "confirmation"];
        for want in expected {
            let body = post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
            assert!(body["notice"].is_null(), "unexpected notice: {}", body["notice"]);
            assert_eq!(body["state"]["step"], want);
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn invalid_step_one_stays_put_with_a_notice() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(
            Arc::new(DisconnectedWalletProvider),
            FlowConfig::individual(),
        )
        .await;
        let client = reqwest::Client::new();

        let created = post_empty(&client, &format!("{base}/api/kyc/sessions")).await;
        let id = created["session_id"].as_str().unwrap().to_string();

        let body = post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
        assert_eq!(body["state"]["step"], "personal_info");
        assert_eq!(body["notice"]["severity"], "destructive");
        assert_eq!(body["notice"]["title"], "Missing information");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn back_preserves_entered_data() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(
            Arc::new(DisconnectedWalletProvider),
            FlowConfig::individual(),
        )
        .await;
        let client = reqwest::Client::new();

        let created = post_empty(&client, &format!("{base}/api/kyc/sessions")).await;
        let id = created["session_id"].as_str().unwrap().to_string();

        let dob = adult_dob();
        for (name, value) in [
            ("first_name", "Jane"),
            ("last_name", "Doe"),
            ("date_of_birth", dob.as_str()),
            ("email", "jane@x.com"),
            ("phone", "+33 612 345 678"),
        ] {
            set_field(&client, &base, &id, name, value).await;
        }

        let advanced = post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
        assert_eq!(advanced["state"]["step"], "documents");

        let back = post_empty(&client, &format!("{base}/api/sessions/{id}/back")).await;
        assert_eq!(back["state"]["step"], "personal_info");
        assert_eq!(back["state"]["fields"]["first_name"], "Jane");
        assert_eq!(back["state"]["fields"]["email"], "jane@x.com");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn kyb_flow_enforces_strict_phone_format() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(
            Arc::new(DisconnectedWalletProvider),
            FlowConfig::individual(),
        )
        .await;
        let client = reqwest::Client::new();

        let created = post_empty(&client, &format!("{base}/api/kyb/sessions")).await;
        let id = created["session_id"].as_str().unwrap().to_string();
        assert_eq!(created["state"]["step"], "company_info");
        assert_eq!(created["progress"]["step_count"], 6);

        for (name, value) in [
            ("company_name", "Acme SARL"),
            ("registration_number", "123 456 789"),
            ("incorporation_date", "2015-06-01"),
            ("company_type", "SARL"),
            ("street_address", "1 rue de la Paix"),
            ("city", "Paris"),
            ("postal_code", "75002"),
            ("country", "France"),
            ("legal_rep_first_name", "Jean"),
            ("legal_rep_last_name", "Martin"),
            ("legal_rep_position", "CEO"),
            ("legal_rep_email", "jean@acme.fr"),
            // Valid under the relaxed digit-count rule, not the strict one.
            ("legal_rep_phone", "0612345678"),
        ] {
            set_field(&client, &base, &id, name, value).await;
        }

        for _ in 0..2 {
            post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
        }
        let body = post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
        assert_eq!(body["state"]["step"], "legal_rep");
        assert_eq!(body["notice"]["title"], "Invalid phone number");

        set_field(&client, &base, &id, "legal_rep_phone", "+33 612 345 678").await;
        let body = post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
        assert_eq!(body["state"]["step"], "documents");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn declining_rewards_clears_the_wallet_address() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(
            Arc::new(DisconnectedWalletProvider),
            FlowConfig::individual(),
        )
        .await;
        let client = reqwest::Client::new();

        let created = post_empty(&client, &format!("{base}/api/kyc/sessions")).await;
        let id = created["session_id"].as_str().unwrap().to_string();

        // Jump the session to the reward step by filling everything before it.
        let dob = adult_dob();
        for (name, value) in [
            ("first_name", "Jane"),
            ("last_name", "Doe"),
            ("date_of_birth", dob.as_str()),
            ("email", "jane@x.com"),
            ("phone", "+33 612 345 678"),
            ("document_number", "AB123456"),
            ("document_expiry", "2030-01-01"),
        ] {
            set_field(&client, &base, &id, name, value).await;
        }
        for slot in ["id_front", "id_back", "selfie"] {
            post(
                &client,
                &format!("{base}/api/sessions/{id}/documents"),
                json!({ "slot": slot, "file_name": "scan.jpg" }),
            )
            .await;
        }
        for _ in 0..3 {
            post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
        }

        post(
            &client,
            &format!("{base}/api/sessions/{id}/wallet"),
            json!({ "address": "not-an-address" }),
        )
        .await;
        post(
            &client,
            &format!("{base}/api/sessions/{id}/rewards"),
            json!({ "wants_rewards": false }),
        )
        .await;

        let body = post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
        assert_eq!(body["state"]["step"], "confirmation");
        assert!(body["state"]["wallet_address"].is_null());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn connect_wallet_on_the_interstitial_advances() {
    timeout(TEST_TIMEOUT, async {
        let address = format!("0x{}", "b".repeat(40));
        let kyc_cfg = FlowConfig {
            offer_wallet_connect: true,
            ..FlowConfig::individual()
        };
        let base = start_server(
            Arc::new(StubWallet {
                address: address.clone(),
            }),
            kyc_cfg,
        )
        .await;
        let client = reqwest::Client::new();

        let created = post_empty(&client, &format!("{base}/api/kyc/sessions")).await;
        let id = created["session_id"].as_str().unwrap().to_string();
        assert_eq!(created["state"]["step"], "wallet_choice");

        let body = post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;
        assert_eq!(body["state"]["step"], "wallet_connect");

        let body = post_empty(&client, &format!("{base}/api/sessions/{id}/connect-wallet")).await;
        assert_eq!(body["state"]["step"], "personal_info");
        assert_eq!(body["state"]["wallet_address"], address.as_str());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn missing_provider_refuses_connect_and_keeps_state() {
    timeout(TEST_TIMEOUT, async {
        let kyc_cfg = FlowConfig {
            offer_wallet_connect: true,
            ..FlowConfig::individual()
        };
        let base = start_server(Arc::new(DisconnectedWalletProvider), kyc_cfg).await;
        let client = reqwest::Client::new();

        let created = post_empty(&client, &format!("{base}/api/kyc/sessions")).await;
        let id = created["session_id"].as_str().unwrap().to_string();
        post_empty(&client, &format!("{base}/api/sessions/{id}/next")).await;

        let body = post_empty(&client, &format!("{base}/api/sessions/{id}/connect-wallet")).await;
        assert_eq!(body["state"]["step"], "wallet_connect");
        assert!(body["state"]["wallet_address"].is_null());
        assert_eq!(body["notice"]["title"], "Wallet provider not found");
        assert_eq!(body["notice"]["severity"], "destructive");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unknown_sessions_return_404_and_delete_drops_state() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(
            Arc::new(DisconnectedWalletProvider),
            FlowConfig::individual(),
        )
        .await;
        let client = reqwest::Client::new();

        let missing = uuid::Uuid::new_v4();
        let response = client
            .get(format!("{base}/api/sessions/{missing}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        let created = post_empty(&client, &format!("{base}/api/kyc/sessions")).await;
        let id = created["session_id"].as_str().unwrap().to_string();

        let response = client
            .delete(format!("{base}/api/sessions/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

        let response = client
            .get(format!("{base}/api/sessions/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    })
    .await
    .expect("test timed out");
}
