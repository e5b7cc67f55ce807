//! Intent handlers: each fixed intent name maps to one SDK call whose result
//! is rendered as a spoken summary plus a table card.

use rust_decimal::Decimal;
use time::Date;

use crate::client::Client;
use crate::entities::bill::Bill;
use crate::error::Result;
use crate::request::{Filter, ListParams};

use super::types::{TableCard, WebhookRequest, WebhookResponse};

/// The one message every failure collapses to. Callers of a voice assistant
/// cannot act on error detail, so none is exposed.
pub(super) const APOLOGY: &str = "Sorry, I wasn't able to reach your accounting data.";

const FALLBACK: &str = "Sorry, I don't know how to help with that yet.";

pub(super) async fn dispatch(client: &Client, request: &WebhookRequest) -> WebhookResponse {
    let query = &request.query_result;
    let result = match query.intent.display_name.as_str() {
        "bills.unpaid.list" => unpaid_bills(client).await,
        "invoices.open.list" => open_invoices(client).await,
        "vendors.list" => vendors(client).await,
        "bills.recurring.list" => recurring_bills(client).await,
        "bills.amount.by_vendor" => amount_due_by_vendor(client, query.string_parameter("vendor")).await,
        other => {
            debug!(intent = other, "unhandled intent");
            return WebhookResponse::text(FALLBACK);
        }
    };

    match result {
        Ok(response) => response,
        Err(error) => {
            warn!(%error, intent = %query.intent.display_name, "intent handler failed");
            WebhookResponse::text(APOLOGY)
        }
    }
}

/// Filter matching bills/invoices that still have an outstanding balance:
/// open (1) or partially paid (2).
fn outstanding() -> Filter {
    Filter::new("paymentStatus", "in", "1,2")
}

async fn unpaid_bills(client: &Client) -> Result<WebhookResponse> {
    let bills = client
        .bills()
        .list(ListParams::default().with_filter(outstanding()))
        .await?;

    if bills.is_empty() {
        return Ok(WebhookResponse::text("You have no unpaid bills. Nice."));
    }

    let total: Decimal = bills.iter().filter_map(|bill| bill.due_amount).sum();
    let mut table = TableCard::new("Unpaid bills", &["Invoice", "Due date", "Amount due"]);
    for bill in &bills {
        table.push_row([
            text(bill.invoice_number.as_deref()),
            date(bill.due_date),
            money(bill.due_amount),
        ]);
    }

    Ok(WebhookResponse::with_table(
        format!(
            "You have {} unpaid {} totaling {}.",
            bills.len(),
            plural(bills.len(), "bill"),
            money(Some(total)),
        ),
        table,
    ))
}

async fn open_invoices(client: &Client) -> Result<WebhookResponse> {
    let invoices = client
        .invoices()
        .list(ListParams::default().with_filter(outstanding()))
        .await?;

    if invoices.is_empty() {
        return Ok(WebhookResponse::text("All of your invoices are paid."));
    }

    let total: Decimal = invoices
        .iter()
        .filter_map(|invoice| invoice.amount_due)
        .sum();
    let mut table = TableCard::new("Open invoices", &["Invoice", "Due date", "Amount due"]);
    for invoice in &invoices {
        table.push_row([
            text(invoice.invoice_number.as_deref()),
            date(invoice.due_date),
            money(invoice.amount_due),
        ]);
    }

    Ok(WebhookResponse::with_table(
        format!(
            "You have {} open {} totaling {}.",
            invoices.len(),
            plural(invoices.len(), "invoice"),
            money(Some(total)),
        ),
        table,
    ))
}

async fn vendors(client: &Client) -> Result<WebhookResponse> {
    let vendors = client.vendors().list_all().await?;

    if vendors.is_empty() {
        return Ok(WebhookResponse::text("You have no vendors on file."));
    }

    let mut table = TableCard::new("Vendors", &["Name", "Email"]);
    for vendor in &vendors {
        table.push_row([text(vendor.name.as_deref()), text(vendor.email.as_deref())]);
    }

    Ok(WebhookResponse::with_table(
        format!(
            "You have {} {} on file.",
            vendors.len(),
            plural(vendors.len(), "vendor"),
        ),
        table,
    ))
}

async fn recurring_bills(client: &Client) -> Result<WebhookResponse> {
    let recurring = client.recurring_bills().list_all().await?;

    if recurring.is_empty() {
        return Ok(WebhookResponse::text("You have no recurring bills set up."));
    }

    let mut table = TableCard::new("Recurring bills", &["Next due", "Schedule", "Amount"]);
    for bill in &recurring {
        let amount: Decimal = bill
            .recurring_bill_line_items
            .iter()
            .filter_map(|item| item.amount)
            .sum();
        table.push_row([
            date(bill.next_due_date),
            text(bill.time_period.as_deref()),
            money(Some(amount)),
        ]);
    }

    Ok(WebhookResponse::with_table(
        format!(
            "You have {} recurring {} set up.",
            recurring.len(),
            plural(recurring.len(), "bill"),
        ),
        table,
    ))
}

async fn amount_due_by_vendor(client: &Client, vendor: Option<&str>) -> Result<WebhookResponse> {
    let Some(vendor_name) = vendor else {
        return Ok(WebhookResponse::text("Which vendor did you mean?"));
    };

    let vendors = client
        .vendors()
        .list(ListParams::default().with_filter(Filter::new("name", "=", vendor_name)))
        .await?;
    let Some(vendor) = vendors.first() else {
        return Ok(WebhookResponse::text(format!(
            "I couldn't find a vendor named {vendor_name}."
        )));
    };

    let bills = client
        .bills()
        .list(
            ListParams::default()
                .with_filter(Filter::new("vendorId", "=", vendor.id.clone()))
                .with_filter(outstanding()),
        )
        .await?;

    if bills.is_empty() {
        return Ok(WebhookResponse::text(format!(
            "You don't owe {vendor_name} anything right now."
        )));
    }

    let total = due_total(&bills);
    let mut table = TableCard::new(
        format!("Owed to {vendor_name}"),
        &["Invoice", "Due date", "Amount due"],
    );
    for bill in &bills {
        table.push_row([
            text(bill.invoice_number.as_deref()),
            date(bill.due_date),
            money(bill.due_amount),
        ]);
    }

    Ok(WebhookResponse::with_table(
        format!(
            "You owe {vendor_name} {} across {} {}.",
            money(Some(total)),
            bills.len(),
            plural(bills.len(), "bill"),
        ),
        table,
    ))
}

fn due_total(bills: &[Bill]) -> Decimal {
    bills.iter().filter_map(|bill| bill.due_amount).sum()
}

fn money(amount: Option<Decimal>) -> String {
    match amount {
        Some(amount) => format!("${:.2}", amount.round_dp(2)),
        None => "n/a".to_string(),
    }
}

fn date(date: Option<Date>) -> String {
    match date {
        Some(date) => date.to_string(),
        None => "n/a".to_string(),
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or("n/a").to_string()
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::client::{Client, Credentials};
    use crate::endpoints::Environment;

    use super::*;

    fn offline_client() -> Client {
        Client::new(Credentials {
            user_name: "assistant@example.com".to_string(),
            password: "hunter2".to_string(),
            dev_key: "devkey".to_string(),
            env: Environment::Sandbox,
        })
        .unwrap()
    }

    fn request_for(intent: &str) -> WebhookRequest {
        serde_json::from_value(json!({
            "queryResult": {
                "parameters": {},
                "intent": {"displayName": intent}
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn unknown_intent_gets_the_fallback_line() {
        let client = offline_client();
        let response = dispatch(&client, &request_for("weather.today")).await;
        assert_eq!(response.fulfillment_text, FALLBACK);
        assert!(response.fulfillment_messages.is_empty());
    }

    #[tokio::test]
    async fn missing_vendor_parameter_asks_for_one() {
        let client = offline_client();
        let response = amount_due_by_vendor(&client, None).await.unwrap();
        assert_eq!(response.fulfillment_text, "Which vendor did you mean?");
    }

    #[test]
    fn money_always_shows_cents() {
        assert_eq!(money(Some(dec!(1200.5))), "$1200.50");
        assert_eq!(money(Some(dec!(3))), "$3.00");
        assert_eq!(money(None), "n/a");
    }

    #[test]
    fn plural_handles_one_and_many() {
        assert_eq!(plural(1, "bill"), "bill");
        assert_eq!(plural(3, "bill"), "bills");
    }
}
