//! HTTP路由handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use deploy_hook_core::api::{resolve_tag, RunOutcome};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::http::state::AppState;

/// 失败命令的退出码
pub const X_RETURN_CODE: &str = "x-returncode";

/// 创建所有路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/deploy", post(deploy_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct DeployQuery {
    pub tag: Option<String>,
}

/// POST /deploy?tag=<ref> - 拉取、检出并执行部署
///
/// 命令序列在独立任务中执行：客户端断开只会丢弃本 future，部署仍会执行完毕。
async fn deploy_handler(
    State(state): State<AppState>,
    Query(query): Query<DeployQuery>,
) -> Response {
    let tag = resolve_tag(query.tag.as_deref()).to_string();
    let deploy_id = Uuid::new_v4();
    let span = info_span!("deploy", %deploy_id, tag = %tag);

    let commands = state.plan.commands(&tag);
    let runner = Arc::clone(&state.runner);
    let task = tokio::spawn(
        async move {
            info!(workdir = %runner.config().workdir.display(), "Deploy started");
            runner.run_all(&commands).await
        }
        .instrument(span.clone()),
    );

    match task.await {
        Ok(outcome) => span.in_scope(|| outcome_response(outcome)),
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            error!(parent: &span, error = %e, "Deploy task cancelled");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// 将执行结果映射为HTTP响应
fn outcome_response(outcome: RunOutcome) -> Response {
    match outcome {
        RunOutcome::Succeeded { output } => {
            info!("Deploy succeeded");
            (StatusCode::OK, output).into_response()
        }
        RunOutcome::Failed {
            step,
            command,
            exit_code,
            output,
        } => {
            warn!(step, command = %command, exit_code, "Deploy failed");
            (
                StatusCode::BAD_REQUEST,
                [(X_RETURN_CODE, exit_code.to_string())],
                output,
            )
                .into_response()
        }
        outcome @ RunOutcome::Errored { .. } => {
            warn!(step = ?outcome.failed_step(), "Deploy aborted: command could not be executed");
            (StatusCode::BAD_REQUEST, outcome.into_output()).into_response()
        }
    }
}

/// GET /health - 健康检查
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "started_at": state.started_at.to_rfc3339(),
        "workdir": state.runner.config().workdir.display().to_string(),
    }))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Method, Request},
    };
    use deploy_hook_core::api::DeployConfig;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    /// `git` 替换为 `echo`，命令只回显参数
    fn echo_config(dir: &std::path::Path) -> DeployConfig {
        DeployConfig {
            workdir: dir.to_path_buf(),
            git: "echo".into(),
            script: vec!["echo".into(), "deploying".into()],
            restart: vec!["echo".into(), "restarted".into()],
            ..DeployConfig::default()
        }
    }

    async fn send(
        cfg: &DeployConfig,
        method: Method,
        uri: &str,
    ) -> (StatusCode, HeaderMap, String) {
        let app = create_router(AppState::new(cfg));
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn return_code(headers: &HeaderMap) -> Option<&str> {
        headers.get("X-ReturnCode").map(|v| v.to_str().unwrap())
    }

    #[tokio::test]
    async fn test_deploy_defaults_to_head() {
        let dir = tempfile::tempdir().unwrap();
        let (status, headers, body) =
            send(&echo_config(dir.path()), Method::POST, "/deploy").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(return_code(&headers), None);
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            body,
            "fetch origin\nfetch --tags origin\ncheckout HEAD\ndeploying\nrestarted\n"
        );
    }

    #[tokio::test]
    async fn test_deploy_checks_out_requested_tag() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) =
            send(&echo_config(dir.path()), Method::POST, "/deploy?tag=v2.0.1").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("checkout v2.0.1\n"));
    }

    #[tokio::test]
    async fn test_failed_step_returns_400_with_return_code() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DeployConfig {
            restart: vec!["sh".into(), "-c".into(), "echo nope >&2; exit 4".into()],
            ..echo_config(dir.path())
        };
        let (status, headers, body) = send(&cfg, Method::POST, "/deploy").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(return_code(&headers), Some("4"));
        assert_eq!(body, "\n\nnope\n");
    }

    #[tokio::test]
    async fn test_killed_step_reports_negative_signal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DeployConfig {
            script: vec!["sh".into(), "-c".into(), "kill -9 $$".into()],
            ..echo_config(dir.path())
        };
        let (status, headers, body) = send(&cfg, Method::POST, "/deploy").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(return_code(&headers), Some("-9"));
        assert_eq!(body, "\n\n");
    }

    #[tokio::test]
    async fn test_missing_script_returns_400_with_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DeployConfig {
            script: vec!["deploy-hook-missing-script".into()],
            ..echo_config(dir.path())
        };
        let (status, headers, body) = send(&cfg, Method::POST, "/deploy").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(return_code(&headers), None);
        assert!(body.contains("failed to spawn process: deploy-hook-missing-script"));
    }

    #[tokio::test]
    async fn test_deploy_requires_post() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, _) = send(&echo_config(dir.path()), Method::GET, "/deploy").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = send(&echo_config(dir.path()), Method::GET, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["workdir"], dir.path().display().to_string());
    }
}
