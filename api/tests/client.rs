//! Integration tests for the backend client against a mock server.

use api::{ApiClient, ApiError, ContactMessage, FilePayload, RegistrationForm};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri()).expect("client builds")
}

fn sample_registration() -> RegistrationForm {
    RegistrationForm {
        course: 7,
        first_name: "Aziz".into(),
        last_name: "Karimov".into(),
        middle_name: "Anvarovich".into(),
        birth_date: "2001-03-14".into(),
        phone: "998901234567".into(),
        email: "aziz@example.com".into(),
        telegram_username: Some("@azizk".into()),
        passport_series: "AB".into(),
        passport_number: "1234567".into(),
        pinfl: "12345678901234".into(),
        passport_image: FilePayload {
            file_name: "passport.jpg".into(),
            mime_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8, 0xff],
        },
    }
}

#[tokio::test]
async fn courses_sends_language_and_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/"))
        .and(query_param("category", "academy"))
        .and(header("accept-language", "uz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": 1,
                "title": "Python dasturlash",
                "slug": "python",
                "description": "",
                "level": "beginner",
                "duration": "8-12 oy",
                "featured": true,
                "category": 2,
                "category_name": "Akademiya"
            }]
        })))
        .mount(&server)
        .await;

    let courses = client(&server)
        .courses("uz", Some("academy"))
        .await
        .expect("courses load");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].slug, "python");
    assert!(courses[0].featured);
}

#[tokio::test]
async fn categories_unwrap_paginated_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "results": [
                { "id": 1, "name": "Академия", "slug": "academy" },
                { "id": 2, "name": "Корпоративный", "slug": "corporate" }
            ]}
        })))
        .mount(&server)
        .await;

    let categories = client(&server).categories("ru").await.expect("categories");
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].slug, "corporate");
}

#[tokio::test]
async fn request_otp_posts_digits_only_phone() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request-otp/"))
        .and(body_json(json!({ "phone": "998901234567" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .request_otp("ru", "998901234567")
        .await
        .expect("otp requested");
}

#[tokio::test]
async fn request_otp_rate_limit_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request-otp/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Too many attempts, retry in 10 minutes"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .request_otp("ru", "998901234567")
        .await
        .expect_err("must fail");
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn verify_otp_requires_verified_flag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify-otp/"))
        .and(body_json(json!({ "phone": "998901234567", "otp_code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "verified": false }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .verify_otp("ru", "998901234567", "123456")
        .await
        .expect_err("unverified result is an error");
    assert!(matches!(err, ApiError::Rejected));
}

#[tokio::test]
async fn verify_otp_accepts_verified_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify-otp/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "verified": true }
        })))
        .mount(&server)
        .await;

    client(&server)
        .verify_otp("en", "998901234567", "654321")
        .await
        .expect("verified");
}

#[tokio::test]
async fn register_accepts_bare_2xx_without_success_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    client(&server)
        .register("uz", &sample_registration())
        .await
        .expect("2xx without body counts as success");
}

#[tokio::test]
async fn register_surfaces_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": { "pinfl": ["already registered"] }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .register("ru", &sample_registration())
        .await
        .expect_err("must fail");
    match err {
        ApiError::Server { message, .. } => assert!(message.contains("already registered")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn contact_form_posts_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/contact/"))
        .and(header("accept-language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let message = ContactMessage {
        name: "Dilnoza".into(),
        phone: "+998901112233".into(),
        email: "dilnoza@example.com".into(),
        message: "Interested in the frontend course".into(),
    };
    client(&server)
        .submit_contact("en", &message)
        .await
        .expect("contact sent");
}
