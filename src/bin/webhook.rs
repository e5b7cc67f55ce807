//! Dialogflow fulfillment server backed by the Bill.com API.
//!
//! Configuration comes from the environment:
//! `BILL_USER_NAME`, `BILL_PASSWORD`, `BILL_DEV_KEY`, `BILL_ORG_ID`,
//! `BILL_ENV` (`sandbox` or `app-test`, defaults to sandbox), and
//! `WEBHOOK_ADDR` (defaults to `0.0.0.0:8080`).

use std::env;
use std::sync::Arc;

use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use billdotcom_rs::{Client, Credentials, Environment, webhook};

fn var(name: &str) -> Result<String> {
    env::var(name)
        .into_diagnostic()
        .wrap_err_with(|| format!("{name} must be set"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let env_name = env::var("BILL_ENV").unwrap_or_default();
    let credentials = Credentials {
        user_name: var("BILL_USER_NAME")?,
        password: var("BILL_PASSWORD")?,
        dev_key: var("BILL_DEV_KEY")?,
        env: Environment::from(env_name.as_str()),
    };
    let org_id = var("BILL_ORG_ID")?;

    let mut client = Client::new(credentials)?;
    client.login(&org_id, None, None).await?;

    let addr = env::var("WEBHOOK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "serving Dialogflow fulfillment");

    axum::serve(listener, webhook::router(Arc::new(client)))
        .await
        .into_diagnostic()
}
