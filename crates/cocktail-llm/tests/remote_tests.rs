use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use cocktail_core::config::{LlmBackend, LlmConfig};
use cocktail_core::traits::Generator;
use cocktail_llm::{build_generator, LlmError, RemoteLlm};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}/v1")
}

fn config(url: String) -> LlmConfig {
    LlmConfig { backend: LlmBackend::Remote, remote_url: url, ..Default::default() }
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_generator_returns_first_choice() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<Value>| async move {
            let prompt = body["messages"][0]["content"].as_str().unwrap_or_default().to_string();
            Json(json!({"choices": [{"message": {"role": "assistant", "content": format!("echo: {prompt}")}}]}))
        }),
    );
    let url = spawn(app).await;
    let llm = build_generator(&config(url)).expect("generator");

    let answer = tokio::task::spawn_blocking(move || llm.generate("Shake well")).await.unwrap().unwrap();
    assert_eq!(answer, "echo: Shake well");
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_status_errors_carry_the_body() {
    let app = Router::new().route("/v1/chat/completions", post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }));
    let url = spawn(app).await;
    let llm = RemoteLlm::new(&config(url)).unwrap();

    match llm.chat("hi").await {
        Err(LlmError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "model loading");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_without_choices_is_an_error() {
    let app = Router::new().route("/v1/chat/completions", post(|| async { Json(json!({"choices": []})) }));
    let url = spawn(app).await;
    let llm = RemoteLlm::new(&config(url)).unwrap();
    assert!(matches!(llm.chat("hi").await, Err(LlmError::EmptyResponse)));
}
