use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use serde_json::{Value, json};
use tracing::info;
use url::Url;
use warp::Filter;
use warp::path::FullPath;

use billdotcom_rs::{Client, Credentials, Environment};

static LOGGING_CONFIGURED: Once = Once::new();

/// Setup before test runs
pub fn do_setup() {
    LOGGING_CONFIGURED.call_once(|| tracing_subscriber::fmt().with_test_writer().init());
    info!("Setting up test environment");
}

/// One request the mock server received: the endpoint path plus the decoded
/// form fields.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub form: HashMap<String, String>,
}

impl CapturedRequest {
    /// The `data` form field parsed back from its JSON string form.
    #[allow(dead_code)]
    pub fn data(&self) -> Value {
        serde_json::from_str(self.form.get("data").expect("request carried no data field"))
            .expect("data field was not valid JSON")
    }
}

/// A local stand-in for the Bill.com API: every POST is recorded, matched
/// against the configured path -> envelope map, and answered with HTTP 200
/// plus a session cookie.
pub struct MockBillCom {
    address: std::net::SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockBillCom {
    /// Starts the server with canned response envelopes keyed by endpoint
    /// path (e.g. `"/Crud/Create/Bill.json"`). Unconfigured paths answer
    /// with a failure envelope.
    pub async fn start(responses: HashMap<&'static str, Value>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);
        let responses: Arc<HashMap<&'static str, Value>> = Arc::new(responses);

        let route = warp::post()
            .and(warp::path::full())
            .and(warp::body::form())
            .map(move |path: FullPath, form: HashMap<String, String>| {
                captured.lock().unwrap().push(CapturedRequest {
                    path: path.as_str().to_string(),
                    form,
                });
                let body = responses.get(path.as_str()).cloned().unwrap_or_else(|| {
                    json!({
                        "response_status": 1,
                        "response_message": "Error",
                        "response_data": {
                            "error_code": "BDC_1111",
                            "error_message": "Unknown endpoint in test fixture.",
                        },
                    })
                });
                warp::reply::with_header(
                    warp::reply::json(&body),
                    "Set-Cookie",
                    "JSESSIONID=mock-session-cookie; Path=/",
                )
            });

        let (address, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        info!(%address, "mock Bill.com server started");

        Self { address, requests }
    }

    pub fn environment(&self) -> Environment {
        let url = Url::parse(&format!("http://{}/", self.address)).unwrap();
        Environment::Custom(url)
    }

    /// Everything received so far, in order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn last_request(&self) -> CapturedRequest {
        self.requests()
            .pop()
            .expect("mock server received no requests")
    }
}

/// A success envelope around the given `response_data`.
pub fn success(response_data: Value) -> Value {
    json!({
        "response_status": 0,
        "response_message": "Success",
        "response_data": response_data,
    })
}

/// A failure envelope carrying the given API error code and message.
#[allow(dead_code)]
pub fn failure(error_code: &str, error_message: &str) -> Value {
    json!({
        "response_status": 1,
        "response_message": "Error",
        "response_data": {
            "error_code": error_code,
            "error_message": error_message,
        },
    })
}

/// The standard login success envelope used across tests.
pub fn login_success() -> Value {
    success(json!({
        "sessionId": "sess-0123456789",
        "orgId": "00801ORGID",
        "usersId": "00601USER",
    }))
}

pub fn test_credentials(env: Environment) -> Credentials {
    Credentials {
        user_name: "tester@example.com".to_string(),
        password: "correct-horse-battery".to_string(),
        dev_key: "01DEVKEY".to_string(),
        env,
    }
}

/// Builds a client against the mock server and logs it in.
#[allow(dead_code)]
pub async fn logged_in_client(server: &MockBillCom) -> Client {
    let mut client = Client::new(test_credentials(server.environment())).unwrap();
    client.login("00801ORGID", None, None).await.unwrap();
    client
}
