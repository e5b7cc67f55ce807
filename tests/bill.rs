#[macro_use]
extern crate tracing;

mod test_utils;

use std::collections::HashMap;

use anyhow::Result;
use rust_decimal_macros::dec;
use serde_json::json;
use time::macros::date;

use billdotcom_rs::entities::bill;
use billdotcom_rs::{Error, Filter, ListParams, Sort};
use test_utils::{MockBillCom, login_success, success};

fn created_bill() -> serde_json::Value {
    json!({
        "entity": "Bill",
        "id": "00n01BILL",
        "vendorId": "00901VENDOR",
        "invoiceNumber": "INV-42",
        "invoiceDate": "2025-06-01",
        "dueDate": "2025-07-01",
        "amount": 350.75,
        "dueAmount": 350.75,
        "paymentStatus": "1",
        "billLineItems": [
            {"entity": "BillLineItem", "id": "bli01", "billId": "00n01BILL", "amount": 350.75}
        ]
    })
}

#[tokio::test]
async fn create_sends_the_wrapped_payload_and_decodes_the_response() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        ("/Crud/Create/Bill.json", success(created_bill())),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let created = client
        .bills()
        .create(&bill::Builder::new(
            "00901VENDOR",
            "INV-42",
            date!(2025 - 06 - 01),
            date!(2025 - 07 - 01),
            vec![bill::LineItemBuilder::new(dec!(350.75))],
        ))
        .await?;

    assert_eq!(created.id, "00n01BILL");
    assert_eq!(created.bill_line_items.len(), 1);

    let request = server.last_request();
    assert_eq!(request.path, "/Crud/Create/Bill.json");
    assert_eq!(
        request.form.get("sessionId").map(String::as_str),
        Some("sess-0123456789")
    );
    let data = request.data();
    debug!("captured create payload: {data}");
    assert_eq!(data["obj"]["entity"], json!("Bill"));
    assert_eq!(data["obj"]["invoiceDate"], json!("2025-06-01"));
    // Amounts go out as bare numbers, line items carry their own tag.
    assert_eq!(data["obj"]["billLineItems"][0]["entity"], json!("BillLineItem"));
    assert_eq!(data["obj"]["billLineItems"][0]["amount"], json!(350.75));
    Ok(())
}

#[tokio::test]
async fn create_with_missing_field_never_reaches_the_wire() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([("/Login.json", login_success())])).await;
    let client = test_utils::logged_in_client(&server).await;

    let err = client
        .bills()
        .create(&bill::Builder::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required field: vendorId, please define vendorId."
    );
    assert!(err.is_validation());
    // Only the login call went out.
    assert_eq!(server.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn read_requires_an_id() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        ("/Crud/Read/Bill.json", success(created_bill())),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let err = client.bills().read("").await.unwrap_err();
    assert_eq!(err.to_string(), "Missing required field: id, please define id.");

    let bill = client.bills().read("00n01BILL").await?;
    assert_eq!(bill.invoice_number.as_deref(), Some("INV-42"));
    assert_eq!(server.last_request().data(), json!({"id": "00n01BILL"}));
    Ok(())
}

#[tokio::test]
async fn list_sends_defaults_and_explicit_parameters() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        ("/Crud/List/Bill.json", success(json!([created_bill()]))),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let bills = client.bills().list_all().await?;
    assert_eq!(bills.len(), 1);
    assert_eq!(
        server.last_request().data(),
        json!({"nested": true, "start": 0, "max": 99, "filters": [], "sort": []})
    );

    client
        .bills()
        .list(
            ListParams::default()
                .with_filter(Filter::new("paymentStatus", "in", "1,2"))
                .with_sort(Sort::descending("dueDate")),
        )
        .await?;
    let data = server.last_request().data();
    assert_eq!(
        data["filters"],
        json!([{"field": "paymentStatus", "op": "in", "value": "1,2"}])
    );
    assert_eq!(data["sort"], json!([{"field": "dueDate", "asc": "0"}]));
    Ok(())
}

#[tokio::test]
async fn update_round_trips_the_full_entity() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        ("/Crud/Read/Bill.json", success(created_bill())),
        ("/Crud/Update/Bill.json", success(created_bill())),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let mut bill = client.bills().read("00n01BILL").await?;
    bill.description = Some("updated over the wire".to_string());
    client.bills().update(&bill).await?;

    let data = server.last_request().data();
    assert_eq!(data["obj"]["entity"], json!("Bill"));
    assert_eq!(data["obj"]["description"], json!("updated over the wire"));
    assert_eq!(data["obj"]["dueAmount"], json!(350.75));
    Ok(())
}

#[tokio::test]
async fn update_rejects_a_tampered_discriminator() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        ("/Crud/Read/Bill.json", success(created_bill())),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let mut bill = client.bills().read("00n01BILL").await?;
    bill.entity = "Vendor".to_string();
    let err = client.bills().update(&bill).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Incorrect entity type: Vendor. Expected entity type: Bill."
    );
    // Read + login only; the bad update never went out.
    assert_eq!(server.requests().len(), 2);
    Ok(())
}

#[tokio::test]
async fn remote_failure_surfaces_code_and_message_verbatim() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        (
            "/Crud/Read/Bill.json",
            test_utils::failure("BDC_1344", "Record not found."),
        ),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let err = client.bills().read("missing").await.unwrap_err();
    match err {
        Error::Api { code, message, .. } => {
            assert_eq!(code, "BDC_1344");
            assert_eq!(message, "Record not found.");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn metadata_is_fetched_once_and_cached() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        (
            "/GetEntityMetadata.json",
            success(json!({
                "Bill": {
                    "fields": {
                        "id": {"entity": "Bill", "type": "id", "isReadOnly": true},
                        "dueDate": {"entity": "Bill", "type": "date"}
                    }
                }
            })),
        ),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let metadata = client.bills().metadata().await?;
    assert_eq!(metadata.fields["id"].is_read_only, Some(true));

    // Second call answers from the cache.
    client.bills().metadata().await?;
    let metadata_calls = server
        .requests()
        .iter()
        .filter(|request| request.path == "/GetEntityMetadata.json")
        .count();
    assert_eq!(metadata_calls, 1);
    Ok(())
}
