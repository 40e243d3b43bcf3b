use konnect_client::{KonnectClient, KonnectConfig};
use konnect_core::{
    InitPaymentRequest, KonnectError, Operation, PaymentGateway, PaymentMethod, Token,
};
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const API_KEY: &str = "test-api-key";
const WALLET_ID: &str = "5f7a209aeb3f76490ac4a3d1";

fn client_for(server: &MockServer) -> KonnectClient {
    KonnectClient::new(KonnectConfig::new(API_KEY, WALLET_ID).with_api_base_url(server.uri()))
}

fn init_request() -> InitPaymentRequest {
    InitPaymentRequest::new(10_000)
        .with_token(Token::TND)
        .with_accepted_payment_methods([PaymentMethod::Wallet, PaymentMethod::BankCard])
        .with_order_id("order-1")
}

#[tokio::test]
async fn test_initiate_payment_returns_gateway_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/init-payment"))
        .and(header("x-api-key", API_KEY))
        .and(header("accept", "*/*"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "receiverWalletId": WALLET_ID,
            "amount": 10000,
            "token": "TND",
            "acceptedPaymentMethods": ["wallet", "bank_card"],
            "orderId": "order-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payUrl": "https://pay.example/abc",
            "paymentRef": "REF123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .initiate_payment(&init_request())
        .await
        .unwrap();

    assert_eq!(response.pay_url(), Some("https://pay.example/abc"));
    assert_eq!(response.payment_ref(), Some("REF123"));
    assert_eq!(
        response.into_value(),
        json!({ "payUrl": "https://pay.example/abc", "paymentRef": "REF123" })
    );
}

#[tokio::test]
async fn test_configured_wallet_overrides_caller_value() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/init-payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payUrl": "https://pay.example/abc",
            "paymentRef": "REF123"
        })))
        .mount(&server)
        .await;

    let params = init_request().with_extra("receiverWalletId", "someone-else");
    client_for(&server).initiate_payment(&params).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["receiverWalletId"], json!(WALLET_ID));
}

#[tokio::test]
async fn test_payment_details_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/P1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment": {
                "id": "P1",
                "amount": 1000,
                "status": "completed",
                "transactions": [{ "_id": "T1", "amount": 1000, "status": "success" }]
            },
            "other": "ignored"
        })))
        .mount(&server)
        .await;

    let payment = client_for(&server).payment_details("P1").await.unwrap();

    assert_eq!(payment.id(), Some("P1"));
    assert_eq!(payment.amount(), Some(1000.0));
    assert_eq!(payment.status(), Some("completed"));
    assert_eq!(payment.transactions().len(), 1);
    assert!(payment.get("other").is_none());
    assert_eq!(
        payment.into_value(),
        json!({
            "id": "P1",
            "amount": 1000,
            "status": "completed",
            "transactions": [{ "_id": "T1", "amount": 1000, "status": "success" }]
        })
    );
}

#[tokio::test]
async fn test_payment_details_sends_no_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/P1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "payment": { "id": "P1" } })))
        .mount(&server)
        .await;

    client_for(&server).payment_details("P1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("x-api-key"));
    assert!(!requests[0].headers.contains_key("content-type"));
}

#[tokio::test]
async fn test_repeated_lookups_are_equal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/P1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment": { "id": "P1", "amount": 1000, "exchangeRate": 1.0 }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.payment_details("P1").await.unwrap();
    let second = client.payment_details("P1").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_dedicated_statuses_for_both_operations() {
    let cases: [(u16, fn(&KonnectError) -> bool); 5] = [
        (401, |e| matches!(e, KonnectError::Unauthorized)),
        (403, |e| matches!(e, KonnectError::Forbidden)),
        (404, |e| matches!(e, KonnectError::NotFound)),
        (422, |e| matches!(e, KonnectError::UnprocessableEntity)),
        (502, |e| matches!(e, KonnectError::BadGateway)),
    ];

    for (status, is_expected) in cases {
        let server = MockServer::start().await;

        // Empty bodies must not turn into decode errors.
        Mock::given(method("POST"))
            .and(path("/payments/init-payment"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/payments/P1"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let err = client.initiate_payment(&init_request()).await.unwrap_err();
        assert!(is_expected(&err), "init-payment {status}: {err:?}");
        assert_eq!(err.status_code(), Some(status));

        let err = client.payment_details("P1").await.unwrap_err();
        assert!(is_expected(&err), "payment-details {status}: {err:?}");
    }
}

#[tokio::test]
async fn test_dedicated_status_wins_over_well_formed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/init-payment"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "payUrl": "https://pay.example/abc",
            "paymentRef": "REF123"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .initiate_payment(&init_request())
        .await
        .unwrap_err();
    assert!(matches!(err, KonnectError::UnprocessableEntity));
}

#[tokio::test]
async fn test_unlisted_status_is_generic_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/init-payment"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/P1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.initiate_payment(&init_request()).await.unwrap_err();
    assert!(matches!(
        err,
        KonnectError::RequestFailed {
            operation: Operation::InitPayment,
            status: 500
        }
    ));
    assert!(err.to_string().starts_with("Failed to initialize payment."));

    let err = client.payment_details("P1").await.unwrap_err();
    assert!(matches!(
        err,
        KonnectError::RequestFailed {
            operation: Operation::PaymentDetails,
            status: 500
        }
    ));
    assert!(err.to_string().starts_with("Failed to get payment details."));
}

#[tokio::test]
async fn test_success_bodies_pass_through_unchecked() {
    let server = MockServer::start().await;

    let bodies = [
        json!({ "payment": { "id": "P1", "transactions": null } }),
        json!({ "payment": { "id": "P2", "amount": 1000.5 } }),
        json!({ "payment": { "id": "P3", "status": 7, "details": { "code": "x" } } }),
    ];
    for (i, body) in bodies.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(format!("/payments/P{}", i + 1)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/payments/init-payment"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"payUrl":"https://x","paymentRef":null}"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);

    for (i, body) in bodies.iter().enumerate() {
        let payment = client
            .payment_details(&format!("P{}", i + 1))
            .await
            .unwrap();
        assert_eq!(payment.as_value(), &body["payment"]);
    }

    let payment = client.payment_details("P1").await.unwrap();
    assert!(payment.transactions().is_empty());
    let payment = client.payment_details("P2").await.unwrap();
    assert_eq!(payment.amount(), Some(1000.5));

    let init = client.initiate_payment(&init_request()).await.unwrap();
    assert_eq!(init.pay_url(), Some("https://x"));
    assert_eq!(init.payment_ref(), None);
    assert_eq!(
        init.into_value(),
        json!({ "payUrl": "https://x", "paymentRef": null })
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/P1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).payment_details("P1").await.unwrap_err();
    assert!(matches!(err, KonnectError::Decode(_)));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Nothing listens on port 1.
    let client = KonnectClient::new(
        KonnectConfig::new(API_KEY, WALLET_ID).with_api_base_url("http://127.0.0.1:1"),
    );
    let err = client.payment_details("P1").await.unwrap_err();
    assert!(matches!(err, KonnectError::Transport(_)));
}

#[tokio::test]
async fn test_client_behind_gateway_trait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/P9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "payment": { "id": "P9" } })))
        .mount(&server)
        .await;

    let gateway: konnect_core::SharedPaymentGateway = std::sync::Arc::new(client_for(&server));
    let payment = gateway.payment_details("P9").await.unwrap();

    assert_eq!(payment.id(), Some("P9"));
    assert_eq!(gateway.provider_name(), "konnect");
}
