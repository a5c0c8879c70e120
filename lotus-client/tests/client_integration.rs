// lotus-client/tests/client_integration.rs
// 集成测试

use lotus_client::{ApiResponse, ClientConfig, HttpClient, LoginResponse};
use shared::models::{PageKey, Staff, UserType};

#[test]
fn test_client_config_builder() {
    let config = ClientConfig::new("https://api.example.com/")
        .with_token("jwt-token")
        .with_timeout(10);

    assert_eq!(config.base_url, "https://api.example.com/");
    assert_eq!(config.token.as_deref(), Some("jwt-token"));
    assert_eq!(config.timeout, 10);
}

#[tokio::test]
async fn test_client_creation() {
    let client = HttpClient::new(&ClientConfig::new("http://localhost:8080"));
    assert!(client.token().is_none());

    let client = client.with_token("jwt-token");
    assert_eq!(client.token(), Some("jwt-token"));
}

#[test]
fn test_login_response_decoding() {
    // response shape as the backend sends it
    let body = r#"{
        "code": "E0000",
        "message": "Success",
        "data": {
            "token": "jwt-token",
            "user": {
                "id": "st_01",
                "username": "ayse",
                "display_name": "Ayşe",
                "user_type": "staff",
                "permissions": "{\"stock\":{\"view\":true,\"create\":false,\"edit\":false,\"delete\":false}}"
            },
            "tenant": { "id": "tn_01", "business_name": "Lotus Beauty" }
        }
    }"#;

    let response: ApiResponse<LoginResponse> = serde_json::from_str(body).unwrap();
    assert!(response.is_ok());

    let login = response.data.unwrap();
    assert_eq!(login.token, "jwt-token");
    assert_eq!(login.tenant.business_name, "Lotus Beauty");
    assert_eq!(login.user.user_type, UserType::Staff);

    // the embedded blob decodes into a working schema
    let state = login.user.permissions_state();
    assert!(state.can_access_page(PageKey::Stock));
    assert!(!state.can_access_page(PageKey::Settings));
}

#[test]
fn test_staff_record_decoding() {
    // owner records carry no permissions blob
    let body = r#"{
        "id": "st_00",
        "username": "owner",
        "display_name": "Sahip",
        "user_type": "owner",
        "is_active": true,
        "permissions": null,
        "created_at": 1700000000,
        "updated_at": null
    }"#;

    let staff: Staff = serde_json::from_str(body).unwrap();
    assert_eq!(staff.user_type, UserType::Owner);
    assert!(staff.permissions.is_none());
    // absent blob decodes to the fail-open state
    assert!(staff.permissions_state().can_access_page(PageKey::Settings));
}

#[test]
fn test_error_response_decoding() {
    let body = r#"{ "code": "E2003", "message": "Page access denied" }"#;
    let response: ApiResponse<LoginResponse> = serde_json::from_str(body).unwrap();
    assert!(!response.is_ok());
    assert!(response.data.is_none());
}
