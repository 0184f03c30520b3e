//! Tests for the users handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::UserNotFoundError;
use crate::domain::ports::{FixtureUserRepository, MockUserRepository, UserPersistenceError};
use crate::inbound::http::envelope::Disclosure;
use crate::inbound::http::test_utils::{EchoTokenIssuer, sample_users, state_with};
use crate::middleware::ErrorTranslator;

async fn call(
    repository: Arc<dyn crate::domain::ports::UserRepository>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let state = state_with(repository, Arc::new(EchoTokenIssuer));
    let app = actix_test::init_service(
        App::new()
            .wrap(ErrorTranslator::new(Disclosure::Full))
            .app_data(web::Data::new(state))
            .service(get_users)
            .service(create_user)
            .service(get_user_by_id),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn fixture(ids: &[&str]) -> Arc<dyn crate::domain::ports::UserRepository> {
    Arc::new(FixtureUserRepository::with_users(sample_users(ids)))
}

#[rstest]
fn lookup_remap_turns_not_found_into_404() {
    let error = map_lookup_error(UsersServiceError::NotFound(UserNotFoundError::new("999")));
    assert_eq!(error.status(), StatusCode::NOT_FOUND);
    assert_eq!(error.to_string(), "User with id 999 not found");
}

#[rstest]
fn lookup_remap_leaves_other_failures_unexpected() {
    let error = map_lookup_error(UsersServiceError::Persistence(
        UserPersistenceError::query("Database down"),
    ));
    assert!(matches!(error, ApiError::Unexpected(_)));
}

#[actix_web::test]
async fn existing_user_is_returned_plainly() {
    let (status, body) = call(fixture(&["123"]), actix_test::TestRequest::get().uri("/users/123")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "123", "name": "User 123"}));
}

#[actix_web::test]
async fn missing_user_yields_domain_envelope() {
    let (status, body) = call(fixture(&["123"]), actix_test::TestRequest::get().uri("/users/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with id 999 not found");
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
    assert_eq!(body["error"]["module"], "UserService");
}

#[actix_web::test]
async fn lookup_persistence_failure_is_internal() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_find_unique()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::connection("Database down")));

    let (status, body) =
        call(Arc::new(repository), actix_test::TestRequest::get().uri("/users/123")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Something went wrong in the server");
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
}

#[actix_web::test]
async fn list_defaults_to_first_ten() {
    let ids: Vec<String> = (0..12).map(|n| format!("user-{n:02}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let (status, body) = call(fixture(&refs), actix_test::TestRequest::get().uri("/users")).await;

    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().expect("array body");
    assert_eq!(listed.len(), 10);
    assert_eq!(listed[0]["id"], "user-00");
}

#[actix_web::test]
async fn list_honours_page_and_limit() {
    let (status, body) = call(
        fixture(&["a", "b", "c", "d", "e"]),
        actix_test::TestRequest::get().uri("/users?page=2&limit=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": "c", "name": "User c"}, {"id": "d", "name": "User d"}])
    );
}

#[rstest]
#[case("/users?page=0", json!(["page must not be less than 1"]))]
#[case("/users?limit=abc", json!(["limit must be an integer number"]))]
#[case("/users?page=x&limit=0", json!(["page must be an integer number", "limit must not be less than 1"]))]
#[actix_web::test]
async fn list_rejects_bad_paging(#[case] uri: &str, #[case] expected: Value) {
    let (status, body) = call(fixture(&[]), actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"], expected);
}

#[actix_web::test]
async fn create_returns_201_with_the_new_user() {
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Ada", "email": "ada@example.com"}));

    let (status, body) = call(fixture(&[]), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Ada");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body.get("email").is_none());
}

#[actix_web::test]
async fn create_rejects_invalid_body() {
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "", "email": "nope"}));

    let (status, body) = call(fixture(&[]), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Input validation failed");
    assert_eq!(
        body["error"]["details"],
        json!(["name must not be empty", "email must be an email"])
    );
}
