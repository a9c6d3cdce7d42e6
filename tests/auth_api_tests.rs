#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Utc;
use user_services::domain::user::{
    ForgotPassword, LoginRequest, RegisterUser, ResetPasswordResponse, UpdatePassword, UserPage,
    UserToken,
};
use user_services::infrastructure::security::validate_token;
use user_services::presentation::error::{
    ErrorResponse, GENERIC_ERROR_MESSAGE, UNAUTHORIZED_MESSAGE,
};

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[actix_web::test]
async fn test_register_returns_token_for_email() {
    let app = setup_app!();

    let token = register_user!(app, "Alice", "alice@example.com", "password123");

    assert!(!token.token.is_empty());
    assert!(token.expiration > Utc::now());
    let subject = validate_token(&token.token, common::JWT_SECRET).unwrap();
    assert_eq!(subject, "alice@example.com");
}

#[actix_web::test]
async fn test_register_duplicate_email_is_bad_request() {
    let app = setup_app!();
    register_user!(app, "Alice", "alice@example.com", "password123");

    let req = test::TestRequest::post()
        .uri("/api/User/Register")
        .set_json(&RegisterUser {
            name: "Other Alice".to_string(),
            email: "ALICE@example.com".to_string(),
            password: "password456".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, GENERIC_ERROR_MESSAGE);
}

#[actix_web::test]
async fn test_register_invalid_payloads_are_bad_request() {
    let app = setup_app!();

    let payloads = [
        serde_json::json!({ "name": "", "email": "a@example.com", "password": "password123" }),
        serde_json::json!({ "name": "A", "email": "not-an-email", "password": "password123" }),
        serde_json::json!({ "name": "A", "email": "a@example.com", "password": "123" }),
        serde_json::json!({ "name": "A", "email": "a@example.com" }),
    ];
    for payload in payloads {
        let req = test::TestRequest::post()
            .uri("/api/User/Register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", payload);
    }

    let req = test::TestRequest::get()
        .uri("/api/User/GetUsers")
        .to_request();
    let page: UserPage = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.user_count, 0);
}

#[actix_web::test]
async fn test_login_success_returns_future_expiration() {
    let app = setup_app!();
    register_user!(app, "Bob", "bob@example.com", "password123");

    let before = Utc::now();
    let req = test::TestRequest::post()
        .uri("/api/User/Login")
        .set_json(&login_request("Bob@Example.com", "password123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let token: UserToken = test::read_body_json(resp).await;
    assert!(!token.token.is_empty());
    assert!(token.expiration > before);
}

#[actix_web::test]
async fn test_login_bad_credentials_is_bad_request() {
    let app = setup_app!();
    register_user!(app, "Bob", "bob@example.com", "password123");

    for (email, password) in [
        ("bob@example.com", "wrong-password"),
        ("nobody@example.com", "password123"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/User/Login")
            .set_json(&login_request(email, password))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, GENERIC_ERROR_MESSAGE);
    }
}

#[actix_web::test]
async fn test_login_malformed_json_is_bad_request() {
    let app = setup_app!();

    let req = test::TestRequest::post()
        .uri("/api/User/Login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, GENERIC_ERROR_MESSAGE);
}

#[actix_web::test]
async fn test_update_password_requires_token() {
    let app = setup_app!();

    let payload = UpdatePassword {
        current_password: "password123".to_string(),
        new_password: "new-password".to_string(),
    };

    let req = test::TestRequest::put()
        .uri("/api/User/UpdatePassword")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::put()
        .uri("/api/User/UpdatePassword")
        .insert_header(("Authorization", "Bearer invalid.token.here"))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_update_password_flow() {
    let app = setup_app!();
    let token = register_user!(app, "Carol", "carol@example.com", "password123");

    // Wrong current password
    let req = test::TestRequest::put()
        .uri("/api/User/UpdatePassword")
        .insert_header(("Authorization", format!("Bearer {}", token.token)))
        .set_json(&UpdatePassword {
            current_password: "not-my-password".to_string(),
            new_password: "new-password".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/User/UpdatePassword")
        .insert_header(("Authorization", format!("Bearer {}", token.token)))
        .set_json(&UpdatePassword {
            current_password: "password123".to_string(),
            new_password: "new-password".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/User/Login")
        .set_json(&login_request("carol@example.com", "password123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/User/Login")
        .set_json(&login_request("carol@example.com", "new-password"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_update_password_with_token_for_changed_email_is_unauthorized() {
    let app = setup_app!();
    let token = register_user!(app, "Erin", "erin@example.com", "password123");

    let req = test::TestRequest::get()
        .uri("/api/User/GetUsers")
        .to_request();
    let page: UserPage = test::call_and_read_body_json(&app, req).await;
    let id = page.users[0].id;

    let req = test::TestRequest::put()
        .uri("/api/User/Update")
        .set_json(serde_json::json!({
            "id": id,
            "name": "Erin",
            "email": "erin.new@example.com",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The token still names the old email.
    let req = test::TestRequest::put()
        .uri("/api/User/UpdatePassword")
        .insert_header(("Authorization", format!("Bearer {}", token.token)))
        .set_json(&UpdatePassword {
            current_password: "password123".to_string(),
            new_password: "new-password".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, UNAUTHORIZED_MESSAGE);

    let req = test::TestRequest::post()
        .uri("/api/User/Login")
        .set_json(&login_request("erin.new@example.com", "password123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_update_password_after_delete_is_unauthorized() {
    let app = setup_app!();
    let token = register_user!(app, "Frank", "frank@example.com", "password123");

    let req = test::TestRequest::get()
        .uri("/api/User/GetUsers")
        .to_request();
    let page: UserPage = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/User/Delete?id={}", page.users[0].id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/api/User/UpdatePassword")
        .insert_header(("Authorization", format!("Bearer {}", token.token)))
        .set_json(&UpdatePassword {
            current_password: "password123".to_string(),
            new_password: "new-password".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_forgot_password_issues_six_digit_password() {
    let app = setup_app!();
    register_user!(app, "Dave", "dave@example.com", "password123");

    let req = test::TestRequest::put()
        .uri("/api/User/ForgotPassword")
        .set_json(&ForgotPassword {
            email: "dave@example.com".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let reset: ResetPasswordResponse = test::read_body_json(resp).await;
    assert_eq!(reset.password.len(), 6);
    assert!(reset.password.chars().all(|c| c.is_ascii_digit()));

    // The reset password replaces the old one.
    let req = test::TestRequest::post()
        .uri("/api/User/Login")
        .set_json(&login_request("dave@example.com", &reset.password))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/User/Login")
        .set_json(&login_request("dave@example.com", "password123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_forgot_password_unknown_email_is_not_found() {
    let app = setup_app!();

    let req = test::TestRequest::put()
        .uri("/api/User/ForgotPassword")
        .set_json(&ForgotPassword {
            email: "ghost@example.com".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
