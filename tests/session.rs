#[macro_use]
extern crate tracing;

mod test_utils;

use std::collections::HashMap;

use anyhow::Result;
use serde_json::json;

use billdotcom_rs::{Client, Credentials, Environment, Error};
use test_utils::{MockBillCom, login_success, success, test_credentials};

#[test]
fn client_requires_every_credential() {
    test_utils::do_setup();

    let err = Client::new(Credentials {
        user_name: String::new(),
        password: "pw".to_string(),
        dev_key: "dk".to_string(),
        env: Environment::Sandbox,
    })
    .unwrap_err();
    assert!(matches!(err, Error::MissingCredential { field: "userName" }));

    let err = Client::new(Credentials {
        user_name: "user@example.com".to_string(),
        password: "pw".to_string(),
        dev_key: String::new(),
        env: Environment::Sandbox,
    })
    .unwrap_err();
    assert!(matches!(err, Error::MissingCredential { field: "devKey" }));
}

#[tokio::test]
async fn login_posts_credentials_and_stores_the_session() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([("/Login.json", login_success())])).await;

    let mut client = Client::new(test_credentials(server.environment()))?;
    assert!(client.session().is_none());

    let session = client.login("00801ORGID", None, None).await?;
    assert_eq!(session.session_id, "sess-0123456789");
    assert_eq!(session.org_id.as_deref(), Some("00801ORGID"));
    assert_eq!(
        client.session().map(|s| s.session_id.as_str()),
        Some("sess-0123456789")
    );

    let request = server.last_request();
    assert_eq!(request.path, "/Login.json");
    assert_eq!(
        request.form.get("userName").map(String::as_str),
        Some("tester@example.com")
    );
    assert_eq!(
        request.form.get("orgId").map(String::as_str),
        Some("00801ORGID")
    );
    assert_eq!(
        request.form.get("devKey").map(String::as_str),
        Some("01DEVKEY")
    );
    // Login itself carries no session ID.
    assert!(!request.form.contains_key("sessionId"));
    Ok(())
}

#[tokio::test]
async fn login_with_empty_org_fails_before_any_request() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::new()).await;

    let mut client = Client::new(test_credentials(server.environment()))?;
    let err = client.login("", None, None).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required field: orgId, please define orgId."
    );
    assert!(server.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_login_surfaces_the_remote_message_verbatim() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([(
        "/Login.json",
        test_utils::failure("BDC_1120", "Invalid login credentials."),
    )]))
    .await;

    let mut client = Client::new(test_credentials(server.environment()))?;
    let err = client.login("00801ORGID", None, None).await.unwrap_err();
    match err {
        Error::Api { code, message, .. } => {
            assert_eq!(code, "BDC_1120");
            assert_eq!(message, "Invalid login credentials.");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    assert!(client.session().is_none());
    Ok(())
}

#[tokio::test]
async fn session_and_cookie_are_replayed_on_later_calls() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        ("/Logout.json", success(json!({}))),
    ]))
    .await;

    let mut client = Client::new(test_credentials(server.environment()))?;
    client.login("00801ORGID", None, None).await?;
    client.logout().await?;

    let requests = server.requests();
    debug!("captured {} requests", requests.len());
    let logout = &requests[1];
    assert_eq!(logout.path, "/Logout.json");
    assert_eq!(
        logout.form.get("sessionId").map(String::as_str),
        Some("sess-0123456789")
    );
    assert!(client.session().is_none());
    Ok(())
}

#[tokio::test]
async fn mfa_challenge_and_authenticate_round_trip() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        (
            "/MFAChallenge.json",
            success(json!({"challengeId": "ch-42"})),
        ),
        (
            "/MFAAuthenticate.json",
            success(json!({"mfaId": "mfa-7788"})),
        ),
        ("/MFAStatus.json", success(json!({"isTrusted": true}))),
    ]))
    .await;

    let client = test_utils::logged_in_client(&server).await;

    let challenge_id = client.mfa_challenge(false).await?;
    assert_eq!(challenge_id, "ch-42");

    let mfa_id = client
        .mfa_authenticate(&challenge_id, "123456", "device-1", "test rig", true)
        .await?;
    assert_eq!(mfa_id, "mfa-7788");

    let status = client.mfa_status(&mfa_id, "device-1").await?;
    assert!(status.is_trusted);

    let authenticate = &server.requests()[2];
    let data = authenticate.data();
    assert_eq!(data["challengeId"], json!("ch-42"));
    assert_eq!(data["rememberMe"], json!(true));
    Ok(())
}
