mod test_utils;

use std::collections::HashMap;

use anyhow::Result;
use rust_decimal_macros::dec;
use serde_json::json;
use time::macros::date;

use billdotcom_rs::{
    BillPayParams, ChargeCustomerParams, InvoicePayParams, MailHeaders, PayBillsParams,
    RecordApPaymentParams, RecordArPaymentParams,
};
use test_utils::{MockBillCom, login_success, success};

#[tokio::test]
async fn pay_bills_posts_the_batch_and_decodes_sent_pays() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        (
            "/PayBills.json",
            success(json!({
                "sentPays": [
                    {
                        "entity": "SentPay",
                        "id": "stp01A",
                        "vendorId": "00901VENDOR",
                        "amount": 275.0,
                        "status": "0",
                        "billPays": [
                            {"entity": "BillPay", "billId": "00n01BILL", "amount": 275.0}
                        ]
                    }
                ]
            })),
        ),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let pays = client
        .payments()
        .pay_bills(&PayBillsParams::new(
            "00901VENDOR",
            vec![BillPayParams::new("00n01BILL", dec!(275))],
        ))
        .await?;

    assert_eq!(pays.len(), 1);
    assert_eq!(pays[0].bill_pays[0].bill_id.as_deref(), Some("00n01BILL"));

    let data = server.last_request().data();
    assert_eq!(data["vendorId"], json!("00901VENDOR"));
    assert_eq!(data["billPays"], json!([{"billId": "00n01BILL", "amount": 275.0}]));
    Ok(())
}

#[tokio::test]
async fn record_ap_payment_marks_bills_paid_offline() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        (
            "/RecordAPPayment.json",
            success(json!({
                "entity": "SentPay",
                "id": "stp01B",
                "vendorId": "00901VENDOR",
                "processDate": "2025-05-15",
                "amount": 90.0,
                "isOnline": false,
                "billPays": [
                    {"entity": "BillPay", "billId": "00n01BILL", "amount": 90.0}
                ]
            })),
        ),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let pay = client
        .payments()
        .record_ap_payment(&RecordApPaymentParams::new(
            "00901VENDOR",
            date!(2025 - 05 - 15),
            vec![BillPayParams::new("00n01BILL", dec!(90))],
        ))
        .await?;

    assert_eq!(pay.is_online, Some(false));
    assert_eq!(
        server.last_request().data()["processDate"],
        json!("2025-05-15")
    );
    Ok(())
}

#[tokio::test]
async fn charge_customer_decodes_the_nested_received_pay() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        (
            "/ChargeCustomer.json",
            success(json!({
                "chargedReceivedPay": {
                    "entity": "ReceivedPay",
                    "id": "rp01A",
                    "customerId": "0cu01CUSTOMER",
                    "amount": 500.0,
                    "paymentType": "3",
                    "invoicePays": [
                        {"entity": "InvoicePay", "invoiceId": "00e01INVOICE", "amount": 500.0}
                    ]
                }
            })),
        ),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let pay = client
        .payments()
        .charge_customer(&ChargeCustomerParams::new(
            "0cu01CUSTOMER",
            "3",
            vec![InvoicePayParams::new("00e01INVOICE", dec!(500))],
        ))
        .await?;

    assert_eq!(pay.id, "rp01A");
    assert_eq!(pay.invoice_pays.len(), 1);
    assert_eq!(pay.invoice_pays[0].amount, Some(dec!(500)));
    Ok(())
}

#[tokio::test]
async fn record_ar_payment_decodes_a_top_level_received_pay() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        (
            "/RecordARPayment.json",
            success(json!({
                "entity": "ReceivedPay",
                "id": "rp01B",
                "customerId": "0cu01CUSTOMER",
                "paymentDate": "2025-05-20",
                "paymentType": "1",
                "amount": 42.0,
                "isOnline": false,
                "invoicePays": []
            })),
        ),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let pay = client
        .payments()
        .record_ar_payment(&RecordArPaymentParams::new(
            "0cu01CUSTOMER",
            date!(2025 - 05 - 20),
            "1",
            dec!(42),
        ))
        .await?;

    assert_eq!(pay.payment_type.as_deref(), Some("1"));
    assert_eq!(pay.amount, Some(dec!(42)));
    Ok(())
}

#[tokio::test]
async fn send_invoice_posts_headers_and_content() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([
        ("/Login.json", login_success()),
        ("/SendInvoice.json", success(json!({}))),
    ]))
    .await;
    let client = test_utils::logged_in_client(&server).await;

    let headers = MailHeaders {
        from_user_id: "00601USER".to_string(),
        to_email_addresses: vec!["billing@customer.example".to_string()],
        subject: Some("Your invoice".to_string()),
    };
    client
        .payments()
        .send_invoice("00e01INVOICE", &headers, "Please find your invoice attached.")
        .await?;

    let data = server.last_request().data();
    assert_eq!(data["invoiceId"], json!("00e01INVOICE"));
    assert_eq!(
        data["headers"]["toEmailAddresses"],
        json!(["billing@customer.example"])
    );
    assert_eq!(
        data["content"]["body"],
        json!("Please find your invoice attached.")
    );
    Ok(())
}

#[tokio::test]
async fn empty_invoice_id_fails_before_any_request() -> Result<()> {
    test_utils::do_setup();
    let server = MockBillCom::start(HashMap::from([("/Login.json", login_success())])).await;
    let client = test_utils::logged_in_client(&server).await;

    let headers = MailHeaders {
        from_user_id: "00601USER".to_string(),
        to_email_addresses: vec![],
        subject: None,
    };
    let err = client
        .payments()
        .send_invoice("", &headers, "body")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required field: invoiceId, please define invoiceId."
    );
    assert_eq!(server.requests().len(), 1);
    Ok(())
}
