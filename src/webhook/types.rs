//! The subset of the Dialogflow v2 fulfillment wire format this service
//! reads and writes. Unknown members are ignored on input and never emitted
//! on output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An incoming fulfillment call from Dialogflow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub response_id: Option<String>,
    pub query_result: QueryResult,
    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: Option<String>,
    /// Resolved entity parameters, keyed by the parameter name configured in
    /// the agent.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    pub intent: Intent,
}

impl QueryResult {
    /// A string parameter by name, treating absent and empty the same way.
    #[must_use]
    pub fn string_parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(name)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
    pub display_name: String,
}

/// The fulfillment answer sent back to Dialogflow: a spoken summary plus an
/// optional table card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fulfillment_messages: Vec<FulfillmentMessage>,
}

impl WebhookResponse {
    #[must_use]
    pub fn text(fulfillment_text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: fulfillment_text.into(),
            fulfillment_messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_table(fulfillment_text: impl Into<String>, table: TableCard) -> Self {
        Self {
            fulfillment_text: fulfillment_text.into(),
            fulfillment_messages: vec![FulfillmentMessage {
                table_card: Some(table),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_card: Option<TableCard>,
}

/// A tabular rich response: column headers plus rows of text cells.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCard {
    pub title: String,
    pub column_properties: Vec<ColumnProperties>,
    pub rows: Vec<TableRow>,
}

impl TableCard {
    #[must_use]
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            column_properties: columns
                .iter()
                .map(|header| ColumnProperties {
                    header: (*header).to_string(),
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I>(&mut self, cells: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.rows.push(TableRow {
            cells: cells
                .into_iter()
                .map(|text| TableCell { text: text.into() })
                .collect(),
        });
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProperties {
    pub header: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_decodes_dialogflow_shape() {
        let request: WebhookRequest = serde_json::from_value(json!({
            "responseId": "abc-123",
            "queryResult": {
                "queryText": "what do I owe acme",
                "parameters": {"vendor": "Acme Corp"},
                "intent": {
                    "name": "projects/demo/agent/intents/xyz",
                    "displayName": "bills.amount.by_vendor"
                }
            },
            "session": "projects/demo/agent/sessions/1"
        }))
        .unwrap();

        assert_eq!(
            request.query_result.intent.display_name,
            "bills.amount.by_vendor"
        );
        assert_eq!(
            request.query_result.string_parameter("vendor"),
            Some("Acme Corp")
        );
        assert_eq!(request.query_result.string_parameter("missing"), None);
    }

    #[test]
    fn table_response_serializes_camel_case() {
        let mut table = TableCard::new("Bills", &["Vendor", "Amount"]);
        table.push_row(["Acme Corp", "$120.50"]);
        let response = WebhookResponse::with_table("You owe $120.50.", table);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["fulfillmentText"], json!("You owe $120.50."));
        assert_eq!(
            value["fulfillmentMessages"][0]["tableCard"]["columnProperties"][0]["header"],
            json!("Vendor")
        );
        assert_eq!(
            value["fulfillmentMessages"][0]["tableCard"]["rows"][0]["cells"][1]["text"],
            json!("$120.50")
        );
    }
}
