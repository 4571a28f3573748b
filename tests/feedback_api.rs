use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use rust_event_feedback::models::ErrorCode;
use rust_event_feedback::models::users::entities::UserRole;
use rust_event_feedback::routes::configure_feedback_form_routes;
use rust_event_feedback::utils::jwt::JwtUtils;
use rust_event_feedback::utils::json_error_handler;

mod common;
use common::{FACULTY_ID, STUDENT_ONE, STUDENT_TWO, spawn_store};

const BASE: &str = "/api/v1/feedback-forms";

fn bearer(user_id: i64, role: UserRole) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user_id, &role).expect("token");
    ("Authorization", format!("Bearer {token}"))
}

fn faculty() -> (&'static str, String) {
    bearer(FACULTY_ID, UserRole::Faculty)
}

fn student(id: i64) -> (&'static str, String) {
    bearer(id, UserRole::Student)
}

macro_rules! feedback_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($store.storage.clone()))
                .configure(configure_feedback_form_routes),
        )
        .await
    };
}

fn venue_form(event_id: i64) -> Value {
    json!({
        "eventId": event_id,
        "title": "Workshop Feedback",
        "questions": [
            { "questionText": "Rate the event", "questionType": "rating", "isRequired": true },
            { "questionText": "Venue", "questionType": "multiple_choice", "options": ["Good", "Bad"] }
        ]
    })
}

#[actix_web::test]
async fn full_feedback_flow_over_http() {
    let store = spawn_store().await;
    let app = feedback_app!(store);

    // 创建
    let req = test::TestRequest::post()
        .uri(BASE)
        .insert_header(faculty())
        .set_json(venue_form(7))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let form_id = body["data"]["form_id"].as_i64().expect("form id");

    // 学生读取表单
    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/event/7"))
        .insert_header(student(STUDENT_ONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let questions = body["data"]["questions"].as_array().expect("questions").clone();
    assert_eq!(questions.len(), 2);
    let rating_q = questions[0]["id"].as_i64().unwrap();
    let venue_q = questions[1]["id"].as_i64().unwrap();

    // 提交，评分允许数字形式
    let submit_body = json!({
        "formId": form_id,
        "eventId": 7,
        "answers": [
            { "questionId": rating_q, "answerText": 4 },
            { "questionId": venue_q, "answerText": "Good" }
        ]
    });
    let req = test::TestRequest::post()
        .uri(&format!("{BASE}/responses"))
        .insert_header(student(STUDENT_ONE))
        .set_json(&submit_body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Thank you for your feedback!");

    // 重复提交
    let req = test::TestRequest::post()
        .uri(&format!("{BASE}/responses"))
        .insert_header(student(STUDENT_ONE))
        .set_json(&submit_body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::FeedbackAlreadySubmitted as i32);

    // 提交状态
    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/check/7/{STUDENT_ONE}"))
        .insert_header(student(STUDENT_ONE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["has_submitted"], true);

    // 教师查看提交与统计
    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/{form_id}/responses"))
        .insert_header(faculty())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let responses = body["data"].as_array().expect("responses");
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["student_name"], "Sam Student");
    assert_eq!(responses[0]["answers"][0]["answer_text"], "4");
    assert_eq!(responses[0]["answers"][1]["question_text"], "Venue");

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/responses/event/7"))
        .insert_header(faculty())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/{form_id}/summary"))
        .insert_header(faculty())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_responses"], 1);
    assert_eq!(body["data"]["questions"][0]["rating"]["average"], 4.0);
}

#[actix_web::test]
async fn requests_without_token_are_unauthorized() {
    let store = spawn_store().await;
    let app = feedback_app!(store);

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/event/1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/event/1"))
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn roles_are_enforced_per_route() {
    let store = spawn_store().await;
    let app = feedback_app!(store);

    // 学生不能建表
    let req = test::TestRequest::post()
        .uri(BASE)
        .insert_header(student(STUDENT_ONE))
        .set_json(venue_form(8))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 教师不能提交反馈
    let req = test::TestRequest::post()
        .uri(&format!("{BASE}/responses"))
        .insert_header(faculty())
        .set_json(json!({ "form_id": 1, "event_id": 8, "answers": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 学生不能查看全部提交
    for uri in [
        format!("{BASE}/1/responses"),
        format!("{BASE}/1/summary"),
        format!("{BASE}/responses/event/8"),
    ] {
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(student(STUDENT_ONE))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    // 学生只能查询自己的提交状态
    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/check/8/{STUDENT_TWO}"))
        .insert_header(student(STUDENT_ONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 教师可以查询任意学生
    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/check/8/{STUDENT_TWO}"))
        .insert_header(faculty())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["has_submitted"], false);
}

#[actix_web::test]
async fn missing_resources_and_bad_input() {
    let store = spawn_store().await;
    let app = feedback_app!(store);

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/event/55"))
        .insert_header(faculty())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::FeedbackFormNotFound as i32);

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/responses/event/55"))
        .insert_header(faculty())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!([]));

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/55/responses"))
        .insert_header(faculty())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!([]));

    let req = test::TestRequest::delete()
        .uri(&format!("{BASE}/55"))
        .insert_header(faculty())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 非法路径参数
    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/event/abc"))
        .insert_header(faculty())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 单选题只有一个选项
    let req = test::TestRequest::post()
        .uri(BASE)
        .insert_header(faculty())
        .set_json(json!({
            "event_id": 56,
            "questions": [ { "text": "Pick", "type": "multiple_choice", "options": ["OnlyOne"] } ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::FeedbackFormInvalid as i32);

    // 请求体不是合法 JSON
    let req = test::TestRequest::post()
        .uri(BASE)
        .insert_header(faculty())
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn faculty_can_update_and_delete() {
    let store = spawn_store().await;
    let app = feedback_app!(store);

    let req = test::TestRequest::post()
        .uri(BASE)
        .insert_header(faculty())
        .set_json(venue_form(9))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let form_id = body["data"]["form_id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("{BASE}/{form_id}"))
        .insert_header(faculty())
        .set_json(json!({
            "title": "Updated",
            "questions": [ { "text": "Comments", "type": "long_text", "required": false } ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/event/9"))
        .insert_header(faculty())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Updated");
    assert_eq!(body["data"]["questions"][0]["question_type"], "long_text");
    assert_eq!(body["data"]["questions"][0]["is_required"], false);

    let req = test::TestRequest::delete()
        .uri(&format!("{BASE}/{form_id}"))
        .insert_header(faculty())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("{BASE}/event/9"))
        .insert_header(faculty())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
