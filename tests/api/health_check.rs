use onboarding_backend::structs::api::HealthBody;
use reqwest::StatusCode;

#[tokio::test]
async fn returns_200_with_connected_store() {
    let app = crate::helpers::spawn_app().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<HealthBody>().await.expect("json body");
    assert!(body.ok);
    assert_eq!(body.db, 1);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = crate::helpers::spawn_app().await;

    let response = app.get("/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn reports_an_unavailable_store() {
    let app = crate::helpers::spawn_app_with(crate::helpers::UnavailableStore).await;

    let body = app
        .get("/health")
        .await
        .json::<HealthBody>()
        .await
        .expect("json body");

    assert!(body.ok);
    assert_eq!(body.db, 0);
}
