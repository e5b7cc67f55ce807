//! Dialogflow fulfillment service answering voice questions about bills,
//! invoices, vendors, and payments with data from the Bill.com API.
//!
//! Enabled with the `webhook` feature. The service is a single axum route,
//! `POST /fulfillment`, sharing one logged-in [`Client`] across requests.
//! Whatever goes wrong while answering, the caller hears the same fixed
//! apology; error detail stays in the logs.

mod intents;
mod types;

pub use types::{
    ColumnProperties, FulfillmentMessage, Intent, QueryResult, TableCard, TableCell, TableRow,
    WebhookRequest, WebhookResponse,
};

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::client::Client;

/// Builds the fulfillment router around a shared, already-logged-in client.
#[must_use]
pub fn router(client: Arc<Client>) -> Router {
    Router::new()
        .route("/fulfillment", post(fulfill))
        .with_state(client)
}

#[instrument(skip(client, request), fields(intent = %request.query_result.intent.display_name))]
async fn fulfill(
    State(client): State<Arc<Client>>,
    Json(request): Json<WebhookRequest>,
) -> Json<WebhookResponse> {
    Json(intents::dispatch(&client, &request).await)
}
