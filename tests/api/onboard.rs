use onboarding_backend::structs::api::{CreatedBody, ErrorBody};
use onboarding_backend::structs::employee::{Gender, MaritalStatus};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::helpers::{contact_form, spawn_app, spawn_app_with, UnavailableStore};

#[tokio::test]
async fn valid_submission_without_files_is_created() {
    let app = spawn_app().await;

    let response = app
        .post_onboard(contact_form("Asha Rao", "asha@example.com", "9876543210"))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.json::<CreatedBody>().await.expect("json body");
    assert!(body.ok);
    assert_eq!(body.id.len(), 24);

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.map(|id| id.to_hex()), Some(body.id));
    assert_eq!(records[0].personal.email, "asha@example.com");
}

#[tokio::test]
async fn empty_submission_is_created() {
    let app = spawn_app().await;

    let response = app.post_onboard(Form::new()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let records = app.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].personal.name, "");
    assert_eq!(records[0].personal.gender, Gender::Unspecified);
    assert_eq!(records[0].personal.marital_status, MaritalStatus::Unspecified);
}

#[tokio::test]
async fn non_numeric_percentages_are_stored_as_zero() {
    let app = spawn_app().await;

    let response = app
        .post_onboard(
            Form::new()
                .text("tenthPercent", "abc")
                .text("twelfthPercent", "88.5")
                .text("ugPercent", "n/a"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let education = &app.store.records()[0].education;
    assert_eq!(education.tenth_percent, 0.0);
    assert_eq!(education.twelfth_percent, 88.5);
    assert_eq!(education.ug_percent, 0.0);
}

#[tokio::test]
async fn unparseable_dob_is_stored_as_null() {
    let app = spawn_app().await;

    let response = app
        .post_onboard(Form::new().text("dob", "not-a-date"))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.store.records()[0].personal.dob, None);
}

#[tokio::test]
async fn out_of_set_gender_is_rejected_without_a_record() {
    let app = spawn_app().await;

    let response = app
        .post_onboard(contact_form("X", "x@example.com", "1").text("gender", "Alien"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorBody>().await.expect("json body");
    assert!(!body.ok);
    assert!(body.error.contains("personal.gender"));
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn family_father_name_defaults_to_personal() {
    let app = spawn_app().await;

    let response = app
        .post_onboard(Form::new().text("fatherName", "Suresh"))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let record = &app.store.records()[0];
    assert_eq!(record.personal.father_name, "Suresh");
    assert_eq!(record.family.father_name, "Suresh");
}

#[tokio::test]
async fn extended_fields_are_stored() {
    let app = spawn_app().await;

    let response = app
        .post_onboard(
            Form::new()
                .text("maritalStatus", "Married")
                .text("spouseName", "Meena")
                .text("childrenNames", "Anu")
                .text("childrenNames", "Binu")
                .text("ifscCode", "HDFC0000123")
                .text("accountNumber", "000111222")
                .text(
                    "previousExperience",
                    r#"[{"companyName":"Acme","position":"Analyst","fromDate":"2018-06-01","toDate":"2021-03-31"}]"#,
                ),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let record = &app.store.records()[0];
    assert_eq!(record.personal.marital_status, MaritalStatus::Married);
    assert_eq!(record.personal.children_names, vec!["Anu", "Binu"]);
    assert_eq!(record.bank_details.ifsc_code, "HDFC0000123");
    assert_eq!(record.previous_experience.len(), 1);
    assert_eq!(record.previous_experience[0].position, "Analyst");
    assert!(record.previous_experience[0].to_date.is_some());
}

#[tokio::test]
async fn file_under_unknown_field_is_rejected() {
    let app = spawn_app().await;

    let form = contact_form("X", "x@example.com", "1").part(
        "resume",
        Part::bytes(b"cv".to_vec()).file_name("cv.pdf"),
    );
    let response = app.post_onboard(form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorBody>().await.expect("json body");
    assert_eq!(body.error, "Unexpected field: resume");
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn second_file_for_a_slot_is_rejected() {
    let app = spawn_app().await;

    let form = Form::new()
        .part("pan", Part::bytes(b"one".to_vec()).file_name("one.pdf"))
        .part("pan", Part::bytes(b"two".to_vec()).file_name("two.pdf"));
    let response = app.post_onboard(form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn json_submission_is_created() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/onboard", app.address))
        .json(&serde_json::json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": 9876543210u64,
            "tenthPercent": 91.5,
            "twelfthPercent": "abc",
            "gender": "Female",
            "childrenNames": ["Anu"],
        }))
        .send()
        .await
        .expect("failed request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.json::<CreatedBody>().await.expect("json body");
    assert!(body.ok);

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.personal.name, "Asha");
    assert_eq!(record.personal.phone, "9876543210");
    assert_eq!(record.personal.gender, Gender::Female);
    assert_eq!(record.personal.children_names, vec!["Anu"]);
    assert_eq!(record.education.tenth_percent, 91.5);
    assert_eq!(record.education.twelfth_percent, 0.0);
    assert_eq!(record.documents, Default::default());
}

#[tokio::test]
async fn json_submission_with_out_of_set_gender_is_rejected() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/onboard", app.address))
        .json(&serde_json::json!({ "gender": "Alien" }))
        .send()
        .await
        .expect("failed request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn malformed_multipart_body_is_a_bad_request() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/onboard", app.address))
        .header("content-type", "multipart/form-data; boundary=abc")
        .body("garbage that is not multipart")
        .send()
        .await
        .expect("failed request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorBody>().await.expect("json body");
    assert!(!body.ok);
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn bare_closing_delimiter_is_an_empty_submission() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/onboard", app.address))
        .header("content-type", "multipart/form-data; boundary=abc")
        .body("--abc--\r\n")
        .send()
        .await
        .expect("failed request");

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.store.records().len(), 1);
}

#[tokio::test]
async fn empty_file_input_under_unknown_field_is_skipped() {
    let app = spawn_app().await;

    let form = contact_form("X", "x@example.com", "1")
        .part("resume", Part::bytes(Vec::new()).file_name(""));
    let response = app.post_onboard(form).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.store.records().len(), 1);
}

#[tokio::test]
async fn empty_file_input_after_a_filled_slot_is_skipped() {
    let app = spawn_app().await;

    let form = Form::new()
        .part("pan", Part::bytes(b"pan".to_vec()).file_name("pan.pdf"))
        .part("pan", Part::bytes(Vec::new()).file_name(""));
    let response = app.post_onboard(form).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let record = &app.store.records()[0];
    let pan = record.documents.pan.clone().expect("pan kept");
    assert!(pan.filename.ends_with("-pan.pdf"));
    assert_eq!(pan.size, 3);
}

#[tokio::test]
async fn insert_failure_is_a_bad_request() {
    let app = spawn_app_with(UnavailableStore).await;

    let response = app
        .post_onboard(contact_form("Asha", "asha@example.com", "1"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorBody>().await.expect("json body");
    assert!(!body.ok);
    assert!(body.error.contains("store unavailable"));
}
