pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::quiz::handlers as quizzes;
use crate::state::AppState;
use crate::submission::handlers as submissions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public quiz API
        .route("/api/v1/quizzes", get(quizzes::handle_list_quizzes))
        .route("/api/v1/quizzes/:slug", get(quizzes::handle_get_quiz))
        .route(
            "/api/v1/quizzes/:slug/next",
            post(quizzes::handle_next_question),
        )
        // Submissions
        .route("/api/v1/submissions", post(submissions::handle_submit_closed))
        .route(
            "/api/v1/submissions/open",
            post(submissions::handle_submit_open),
        )
        // Admin
        .route(
            "/api/v1/admin/submissions",
            get(admin::handle_list_submissions),
        )
        .route(
            "/api/v1/admin/submissions/:id/report",
            get(admin::handle_get_report),
        )
        .route(
            "/api/v1/admin/submissions/:id/report/pdf",
            get(admin::handle_get_report_pdf),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::layout::default_page_config;
    use crate::models::submission::{StoredAnswers, StoredClosedAnswer};
    use crate::notify::testing::RecordingNotifier;
    use crate::quiz::Catalog;
    use crate::submission::store::{MemoryStore, SubmissionStore, UnavailableStore};

    const PASSWORD: &str = "segredo";

    fn test_config() -> Config {
        Config {
            database_url: None,
            admin_password: Some(PASSWORD.to_string()),
            port: 0,
            rust_log: "info".to_string(),
            smtp: None,
            admin_dashboard_url: Some("https://painel.example.com".to_string()),
            whatsapp_number: Some("5513999999999".to_string()),
        }
    }

    struct Harness {
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
        app: Router,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let app = router_with(store.clone(), notifier.clone());
        Harness {
            store,
            notifier,
            app,
        }
    }

    fn router_with(store: Arc<dyn SubmissionStore>, notifier: Arc<RecordingNotifier>) -> Router {
        build_router(AppState {
            catalog: Arc::new(Catalog::builtin().unwrap()),
            store,
            notifier,
            config: test_config(),
            page_config: default_page_config(),
        })
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Bytes) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let (status, body) = send(app, req).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(app, req).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn admin_get(uri: &str) -> Request<Body> {
        Request::get(uri)
            .header("x-admin-password", PASSWORD)
            .body(Body::empty())
            .unwrap()
    }

    fn closed_payload() -> Value {
        json!({
            "quizId": "ansiedade",
            "name": "Ana Lima",
            "email": "ana@example.com",
            "phone": "(13) 99722-3066",
            "responses": [
                {"id": "ans-base-1", "value": 4},
                {"id": "ans-sutil-1", "value": 4},
                {"id": "ans-mod-1", "value": 4},
                {"id": "ans-int-1", "value": 4},
                {"id": "ans-int-2", "value": 4}
            ]
        })
    }

    fn open_payload(text: &str) -> Value {
        let answers: serde_json::Map<String, Value> = (1..=5)
            .map(|i| (format!("ven-open-{i}"), json!(text)))
            .collect();
        json!({
            "quizId": "vendas",
            "name": "Bruno",
            "phone": "13 99722-3066",
            "answers": answers
        })
    }

    async fn wait_for_notice(notifier: &RecordingNotifier) -> usize {
        for _ in 0..100 {
            if !notifier.sent.lock().await.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        notifier.sent.lock().await.len()
    }

    // ── Public quiz API ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let (status, body) = get_json(&h.app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "quiz-api");
    }

    #[tokio::test]
    async fn test_lists_catalog() {
        let h = harness();
        let (status, body) = get_json(&h.app, "/api/v1/quizzes").await;
        assert_eq!(status, StatusCode::OK);
        let slugs: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["ansiedade", "comunicacao", "vendas"]);
        assert_eq!(body[0]["totalQuestions"], 5);
        assert_eq!(body[0]["hasOpenVariant"], true);
    }

    #[tokio::test]
    async fn test_unknown_quiz_is_not_found() {
        let h = harness();
        let (status, body) = get_json(&h.app, "/api/v1/quizzes/astrologia").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_next_question_starts_with_base() {
        let h = harness();
        let (status, body) =
            post_json(&h.app, "/api/v1/quizzes/vendas/next", json!({"flow": []})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["id"], "ven-base-1");
        assert_eq!(body["remaining"], 5);
    }

    #[tokio::test]
    async fn test_next_question_on_complete_flow_is_null() {
        let h = harness();
        let flow = json!({"flow": [
            {"id": "ans-base-1", "value": 1},
            {"id": "ans-sutil-1", "value": 1},
            {"id": "ans-sutil-2", "value": 1},
            {"id": "ans-sutil-3", "value": 1},
            {"id": "ans-sutil-4", "value": 1}
        ]});
        let (status, body) = post_json(&h.app, "/api/v1/quizzes/ansiedade/next", flow).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["question"].is_null());
        assert_eq!(body["remaining"], 0);
    }

    #[tokio::test]
    async fn test_next_question_rejects_flow_without_base() {
        let h = harness();
        let flow = json!({"flow": [{"id": "ans-sutil-1", "value": 2}]});
        let (status, body) = post_json(&h.app, "/api/v1/quizzes/ansiedade/next", flow).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_FLOW");
    }

    // ── Submissions ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_closed_submission_is_stored_and_notified() {
        let h = harness();
        let (status, body) = post_json(&h.app, "/api/v1/submissions", closed_payload()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], "muito-alto");
        assert!(body.get("whatsappUrl").is_none());

        let rows = h.store.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.to_string(), body["id"].as_str().unwrap());
        assert_eq!(rows[0].quiz_id, "ansiedade");
        assert_eq!(rows[0].score, 20);
        assert!(rows[0].report.contains("Nome: Ana Lima"));

        assert_eq!(wait_for_notice(&h.notifier).await, 1);
        let notice = h.notifier.sent.lock().await[0].clone();
        assert_eq!(notice.admin_url.as_deref(), Some("https://painel.example.com"));
    }

    #[tokio::test]
    async fn test_closed_submission_reports_failed_rule() {
        let h = harness();
        let mut payload = closed_payload();
        payload["responses"].as_array_mut().unwrap().pop();
        let (status, body) = post_json(&h.app, "/api/v1/submissions", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["rule"], "answer_count");
        assert!(h.store.rows().await.is_empty());
    }

    #[tokio::test]
    async fn test_closed_submission_unknown_quiz() {
        let h = harness();
        let mut payload = closed_payload();
        payload["quizId"] = json!("astrologia");
        let (status, body) = post_json(&h.app, "/api/v1/submissions", payload).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["rule"], "unknown_quiz");
    }

    #[tokio::test]
    async fn test_evasive_open_submission() {
        let h = harness();
        let (status, body) =
            post_json(&h.app, "/api/v1/submissions/open", open_payload("maybe")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], "alto");
        let url = body["whatsappUrl"].as_str().unwrap();
        assert!(url.starts_with("https://wa.me/5513999999999?text="));

        let rows = h.store.rows().await;
        assert_eq!(rows[0].quiz_id, "aberto-vendas");
        assert_eq!(rows[0].phone.as_deref(), Some("13997223066"));
        assert_eq!(rows[0].score, 15);
        let scores: Vec<u64> = rows[0]
            .answers
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["score"].as_u64().unwrap())
            .collect();
        assert_eq!(scores, vec![3, 3, 3, 3, 3]);
    }

    #[tokio::test]
    async fn test_stored_answers_parse_back_to_submitted_pairs() {
        let h = harness();
        let mut payload = open_payload("");
        for i in 1..=5 {
            payload["answers"][format!("ven-open-{i}")] =
                json!(format!("Resposta {i}: eu ligo para o cliente no dia seguinte."));
        }
        let (status, _) = post_json(&h.app, "/api/v1/submissions/open", payload).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = post_json(&h.app, "/api/v1/submissions", closed_payload()).await;
        assert_eq!(status, StatusCode::OK);

        let rows = h.store.rows().await;
        let open_row = rows.iter().find(|r| r.quiz_id == "aberto-vendas").unwrap();
        let Some(StoredAnswers::Open(open)) = StoredAnswers::from_json(&open_row.answers) else {
            panic!("open answers did not parse: {}", open_row.answers);
        };
        let mut pairs: Vec<(String, String)> =
            open.into_iter().map(|a| (a.id, a.text)).collect();
        pairs.sort();
        let expected: Vec<(String, String)> = (1..=5)
            .map(|i| {
                (
                    format!("ven-open-{i}"),
                    format!("Resposta {i}: eu ligo para o cliente no dia seguinte."),
                )
            })
            .collect();
        assert_eq!(pairs, expected);

        let closed_row = rows.iter().find(|r| r.quiz_id == "ansiedade").unwrap();
        let expected_closed: Vec<StoredClosedAnswer> = closed_payload()["responses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| StoredClosedAnswer {
                id: r["id"].as_str().unwrap().to_string(),
                value: r["value"].as_u64().unwrap() as u8,
            })
            .collect();
        assert_eq!(
            StoredAnswers::from_json(&closed_row.answers),
            Some(StoredAnswers::Closed(expected_closed))
        );
    }

    #[tokio::test]
    async fn test_open_submission_rejects_short_phone() {
        let h = harness();
        let mut payload = open_payload("resposta completa");
        payload["phone"] = json!("9999");
        let (status, body) = post_json(&h.app, "/api/v1/submissions/open", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["rule"], "phone_invalid");
    }

    #[tokio::test]
    async fn test_missing_database_is_server_error() {
        let app = router_with(Arc::new(UnavailableStore), Arc::new(RecordingNotifier::default()));
        let (status, body) = post_json(&app, "/api/v1/submissions", closed_payload()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "PERSISTENCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_failed_notification_keeps_submission() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        let app = router_with(store.clone(), notifier.clone());
        let (status, _) = post_json(&app, "/api/v1/submissions", closed_payload()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(wait_for_notice(&notifier).await, 1);
        assert_eq!(store.rows().await.len(), 1);
    }

    // ── Admin ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_admin_requires_password() {
        let h = harness();
        let (status, body) = get_json(&h.app, "/api/v1/admin/submissions").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_admin_lists_with_whatsapp_link() {
        let h = harness();
        post_json(&h.app, "/api/v1/submissions", closed_payload()).await;
        post_json(&h.app, "/api/v1/submissions/open", open_payload("maybe")).await;

        let (status, body) = send(&h.app, admin_get("/api/v1/admin/submissions")).await;
        assert_eq!(status, StatusCode::OK);
        let list: Value = serde_json::from_slice(&body).unwrap();
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["quizId"], "aberto-vendas");
        assert!(list[1]["createdAt"].is_string());
        assert!(list[1]["whatsappUrl"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/5513997223066?text="));
    }

    #[tokio::test]
    async fn test_admin_text_report_download() {
        let h = harness();
        post_json(&h.app, "/api/v1/submissions", closed_payload()).await;
        let id = h.store.rows().await[0].id;

        let resp = h
            .app
            .clone()
            .oneshot(admin_get(&format!("/api/v1/admin/submissions/{id}/report")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"relatorio-ana-lima.txt\""
        );
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, h.store.rows().await[0].report.as_bytes());
    }

    #[tokio::test]
    async fn test_admin_pdf_report() {
        let h = harness();
        post_json(&h.app, "/api/v1/submissions/open", open_payload("maybe")).await;
        let id = h.store.rows().await[0].id;

        let resp = h
            .app
            .clone()
            .oneshot(admin_get(&format!("/api/v1/admin/submissions/{id}/report/pdf")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_admin_unknown_submission() {
        let h = harness();
        let uri = format!("/api/v1/admin/submissions/{}/report", uuid::Uuid::new_v4());
        let (status, _) = send(&h.app, admin_get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
