//! HttpInferenceClient against an in-process inference service.

use std::net::SocketAddr;
use std::time::Duration;

use arcplan_upload::{
  CandidateFile, HttpInferenceClient, InferenceClient, UploadError, VideoFile, accept_files,
};
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Mirrors the service: one `file` part in, a blueprint out.
async fn upload_handler(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
  while let Ok(Some(field)) = multipart.next_field().await {
    if field.name() != Some("file") {
      continue;
    }
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();
    let Ok(data) = field.bytes().await else {
      return (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "unreadable part"})),
      );
    };

    return (
      StatusCode::OK,
      Json(json!({
        "filename": file_name,
        "message": format!("{} bytes of {}", data.len(), content_type),
        "blueprint": [
          {"name": "chair", "x": 0.2, "y": 0.3},
          {"name": "tv", "x": 0.8, "y": 0.1}
        ]
      })),
    );
  }

  (
    StatusCode::BAD_REQUEST,
    Json(json!({"error": "No file part"})),
  )
}

async fn failing_handler() -> (StatusCode, Json<Value>) {
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(json!({"error": "model timeout"})),
  )
}

async fn empty_handler() -> (StatusCode, Json<Value>) {
  (
    StatusCode::OK,
    Json(json!({"message": "File processed successfully"})),
  )
}

async fn slow_handler() -> (StatusCode, Json<Value>) {
  tokio::time::sleep(Duration::from_secs(5)).await;
  (StatusCode::OK, Json(json!({})))
}

async fn start_server() -> SocketAddr {
  let app = Router::new()
    .route("/upload", post(upload_handler))
    .route("/fail", post(failing_handler))
    .route("/empty", post(empty_handler))
    .route("/slow", post(slow_handler));

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  addr
}

fn client_for(addr: SocketAddr, path: &str, timeout: Duration) -> HttpInferenceClient {
  let url = format!("http://{}{}", addr, path).parse().unwrap();
  HttpInferenceClient::new(url, timeout).unwrap()
}

fn room_video() -> VideoFile {
  accept_files(vec![CandidateFile::new(
    "room.mp4",
    Some("video/mp4".to_string()),
    vec![7u8; 1024],
  )])
  .unwrap()
}

#[tokio::test]
async fn test_upload_sends_single_file_part() {
  let addr = start_server().await;
  let client = client_for(addr, "/upload", Duration::from_secs(5));

  let response = client.upload(&room_video()).await.unwrap();

  assert_eq!(response.filename.as_deref(), Some("room.mp4"));
  assert_eq!(response.message.as_deref(), Some("1024 bytes of video/mp4"));
  assert_eq!(response.blueprint.len(), 2);
  assert_eq!(response.blueprint[0].name, "chair");
}

#[tokio::test]
async fn test_server_error_is_reported_verbatim() {
  let addr = start_server().await;
  let client = client_for(addr, "/fail", Duration::from_secs(5));

  match client.upload(&room_video()).await {
    Err(UploadError::Server { status, message }) => {
      assert_eq!(status, 500);
      assert_eq!(message, "model timeout");
    }
    other => panic!("expected server error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_missing_blueprint_is_empty_success() {
  let addr = start_server().await;
  let client = client_for(addr, "/empty", Duration::from_secs(5));

  let response = client.upload(&room_video()).await.unwrap();
  assert!(response.blueprint.is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_failure_with_fallback_message() {
  let addr = start_server().await;
  let client = client_for(addr, "/missing", Duration::from_secs(5));

  match client.upload(&room_video()).await {
    Err(UploadError::Server { status, message }) => {
      assert_eq!(status, 404);
      assert_eq!(message, "upload failed with status 404");
    }
    other => panic!("expected server error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let client = client_for(addr, "/upload", Duration::from_secs(5));
  let result = client.upload(&room_video()).await;
  assert!(matches!(result, Err(UploadError::Network { .. })));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
  let addr = start_server().await;
  let client = client_for(addr, "/slow", Duration::from_millis(100));

  let result = client.upload(&room_video()).await;
  assert!(matches!(result, Err(UploadError::Network { .. })));
}

#[test]
fn test_from_config_rejects_bad_endpoint() {
  let config = arcplan_config::ClientConfig {
    endpoint: "nope".to_string(),
    ..Default::default()
  };
  assert!(HttpInferenceClient::from_config(&config).is_err());
}
