//! Dwolla client behavior against the mock API.

mod common;

use axum::http::Method;
use common::{MockDwolla, Reply};
use fundwire::{
    BankAccountType, CreateExchangeOptions, DwollaError, ExchangeFundingSourceOptions,
    NewCustomer, TransferParams,
};
use serde_json::{Value, json};

const HAL_JSON: &str = "application/vnd.dwolla.v1.hal+json";

fn partners() -> Value {
    json!({
        "_links": { "self": { "href": "https://api-sandbox.dwolla.com/exchange-partners" } },
        "_embedded": {
            "exchange-partners": [
                {
                    "id": "292317ec-e252-47d8-93c3-2d128e037aa4",
                    "name": "MX",
                    "status": "active",
                    "_links": { "self": { "href": "https://api-sandbox.dwolla.com/exchange-partners/292317ec" } }
                },
                {
                    "id": "5f4c2f6a-12d1-4d0b-a6a1-10a8b2e0d3b7",
                    "name": "Plaid",
                    "status": "active",
                    "_links": { "self": { "href": "https://api-sandbox.dwolla.com/exchange-partners/5f4c2f6a" } }
                }
            ]
        },
        "total": 2
    })
}

#[tokio::test]
async fn test_token_is_fetched_once_and_reused() {
    let mock = MockDwolla::start().await;
    mock.on(Method::POST, "/customers", Reply::created("https://api-sandbox.dwolla.com/customers/c1"));
    let client = mock.client();

    let customer = NewCustomer::unverified("Jane", "Doe", "jane@example.com");
    client.create_customer(&customer).await.unwrap();
    client.create_customer(&customer).await.unwrap();

    let tokens = mock.token_requests();
    assert_eq!(tokens.len(), 1);
    assert_eq!(
        tokens[0].header("authorization"),
        Some("Basic dGVzdC1rZXk6dGVzdC1zZWNyZXQ=")
    );
    assert_eq!(tokens[0].body, Value::String("grant_type=client_credentials".to_string()));

    for request in mock.requests() {
        assert_eq!(request.header("authorization"), Some("Bearer token-1"));
    }
}

#[tokio::test]
async fn test_token_is_refreshed_near_expiry() {
    let mock = MockDwolla::start().await;
    mock.set_token_lifetime(30);
    mock.on(Method::POST, "/transfers", Reply::created("https://api-sandbox.dwolla.com/transfers/t1"));
    let client = mock.client();

    let params = TransferParams::new("https://x/funding-sources/a", "https://x/funding-sources/b", "1.00");
    client.create_transfer(&params).await.unwrap();
    client.create_transfer(&params).await.unwrap();

    assert_eq!(mock.token_requests().len(), 2);
    let requests = mock.requests();
    assert_eq!(requests[1].header("authorization"), Some("Bearer token-2"));
}

#[tokio::test]
async fn test_unauthorized_response_drops_cached_token() {
    let mock = MockDwolla::start().await;
    mock.on(
        Method::POST,
        "/transfers",
        Reply::error(401, "ExpiredAccessToken", "Invalid access token."),
    );
    let client = mock.client();
    let params = TransferParams::new("https://x/funding-sources/a", "https://x/funding-sources/b", "1.00");

    let err = client.create_transfer(&params).await.unwrap_err();
    assert!(matches!(err, DwollaError::Api { status: 401, ref code, .. } if code == "ExpiredAccessToken"));
    assert_eq!(mock.requests().len(), 1);

    mock.on(Method::POST, "/transfers", Reply::created("https://api-sandbox.dwolla.com/transfers/t1"));
    client.create_transfer(&params).await.unwrap();

    assert_eq!(mock.token_requests().len(), 2);
    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].header("authorization"), Some("Bearer token-1"));
    assert_eq!(requests[1].header("authorization"), Some("Bearer token-2"));
}

#[tokio::test]
async fn test_requests_use_hal_media_type() {
    let mock = MockDwolla::start().await;
    mock.on(Method::POST, "/customers", Reply::created("https://api-sandbox.dwolla.com/customers/c1"));
    let client = mock.client();

    let location = client
        .create_customer(&NewCustomer::unverified("Jane", "Doe", "jane@example.com"))
        .await
        .unwrap();
    assert_eq!(location, "https://api-sandbox.dwolla.com/customers/c1");

    let request = &mock.requests()[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.header("accept"), Some(HAL_JSON));
    assert_eq!(request.header("content-type"), Some(HAL_JSON));
    assert_eq!(
        request.body,
        json!({ "firstName": "Jane", "lastName": "Doe", "email": "jane@example.com" })
    );
}

#[tokio::test]
async fn test_validation_error_is_typed() {
    let mock = MockDwolla::start().await;
    mock.on(
        Method::POST,
        "/customers",
        Reply::error(400, "ValidationError", "Validation error(s) present. See embedded errors list for more details."),
    );

    let err = mock
        .client()
        .create_customer(&NewCustomer::unverified("Jane", "Doe", "not-an-email"))
        .await
        .unwrap_err();

    match err {
        DwollaError::Api { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, "ValidationError");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_error_body_keeps_status() {
    let mock = MockDwolla::start().await;
    mock.on(Method::POST, "/transfers", Reply::json(500, json!("upstream exploded")));

    let params = TransferParams::new("https://x/funding-sources/a", "https://x/funding-sources/b", "1.00");
    let err = mock.client().create_transfer(&params).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(matches!(err, DwollaError::Api { ref code, .. } if code == "Internal Server Error"));
}

#[tokio::test]
async fn test_rate_limit() {
    let mock = MockDwolla::start().await;
    mock.on(Method::POST, "/transfers", Reply::error(429, "TooManyRequests", "slow down"));

    let params = TransferParams::new("https://x/funding-sources/a", "https://x/funding-sources/b", "1.00");
    let err = mock.client().create_transfer(&params).await.unwrap_err();

    assert!(matches!(err, DwollaError::RateLimited));
    assert_eq!(mock.requests().len(), 1, "no retries");
}

#[tokio::test]
async fn test_missing_location_header() {
    let mock = MockDwolla::start().await;
    mock.on(Method::POST, "/customers", Reply::json(200, json!({})));

    let err = mock
        .client()
        .create_customer(&NewCustomer::unverified("Jane", "Doe", "jane@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, DwollaError::MissingLocation(ref path) if path == "customers"));
}

#[tokio::test]
async fn test_on_demand_authorization_has_no_body() {
    let mock = MockDwolla::start().await;
    mock.on(
        Method::POST,
        "/on-demand-authorizations",
        Reply::json(
            200,
            json!({
                "_links": { "self": { "href": "https://api-sandbox.dwolla.com/on-demand-authorizations/30e7c028" } },
                "bodyText": "I agree that future payments to Company ABC inc. will be processed by the Dwolla payment system.",
                "buttonText": "Agree & Continue"
            }),
        ),
    );

    let auth = mock.client().create_on_demand_authorization().await.unwrap();
    assert_eq!(
        auth.links["self"].href,
        "https://api-sandbox.dwolla.com/on-demand-authorizations/30e7c028"
    );
    assert_eq!(auth.button_text, "Agree & Continue");

    let request = &mock.requests()[0];
    assert_eq!(request.body, Value::Null);
    assert_eq!(request.header("content-type"), None);
}

#[tokio::test]
async fn test_on_demand_authorization_without_links() {
    let mock = MockDwolla::start().await;
    mock.on(Method::POST, "/on-demand-authorizations", Reply::created("https://x/on-demand-authorizations/1"));

    let err = mock.client().create_on_demand_authorization().await.unwrap_err();
    assert!(matches!(err, DwollaError::MissingField("_links")));
}

#[tokio::test]
async fn test_exchange_partner_lookup_is_case_insensitive() {
    let mock = MockDwolla::start().await;
    mock.on(Method::GET, "/exchange-partners", Reply::json(200, partners()));
    let client = mock.client();

    assert_eq!(
        client.exchange_partner_href("PLAID").await.unwrap(),
        "https://api-sandbox.dwolla.com/exchange-partners/5f4c2f6a"
    );
    assert_eq!(client.exchange_partners().await.unwrap().len(), 2);

    let err = client.exchange_partner_href("Finicity").await.unwrap_err();
    assert!(matches!(err, DwollaError::PartnerNotFound(ref name) if name == "Finicity"));

    let request = &mock.requests()[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.header("accept"), Some(HAL_JSON));
}

#[tokio::test]
async fn test_exchange_and_exchange_funding_source() {
    let mock = MockDwolla::start().await;
    mock.on(
        Method::POST,
        "/customers/c1/exchanges",
        Reply::created("https://api-sandbox.dwolla.com/exchanges/e1"),
    );
    mock.on(
        Method::POST,
        "/customers/c1/funding-sources",
        Reply::created("https://api-sandbox.dwolla.com/funding-sources/f1"),
    );
    let client = mock.client();

    let exchange_url = client
        .create_exchange(&CreateExchangeOptions {
            customer_id: "c1".to_string(),
            exchange_partner_href: "https://api-sandbox.dwolla.com/exchange-partners/5f4c2f6a".to_string(),
            token: "plaid-token".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(exchange_url, "https://api-sandbox.dwolla.com/exchanges/e1");

    let funding_url = client
        .create_exchange_funding_source(&ExchangeFundingSourceOptions {
            customer_id: "c1".to_string(),
            exchange_url,
            name: "Everyday Checking".to_string(),
            account_type: BankAccountType::Checking,
        })
        .await
        .unwrap();
    assert_eq!(funding_url, "https://api-sandbox.dwolla.com/funding-sources/f1");

    let requests = mock.requests();
    assert_eq!(requests[0].body["token"], "plaid-token");
    assert_eq!(
        requests[1].body,
        json!({
            "_links": { "exchange": { "href": "https://api-sandbox.dwolla.com/exchanges/e1" } },
            "bankAccountType": "checking",
            "name": "Everyday Checking"
        })
    );
}

#[tokio::test]
async fn test_absolute_urls_pass_through() {
    let mock = MockDwolla::start().await;
    mock.on(Method::GET, "/funding-sources/f1", Reply::json(200, json!({ "name": "Chase" })));
    let client = mock.client();

    let response = client
        .get(&format!("{}/funding-sources/f1", mock.base_url))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body["name"], "Chase");
    assert_eq!(response.location, None);
}
