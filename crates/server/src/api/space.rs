//! 磁盘剩余空间 API 路由。
//!
//! 对临时目录（以及可解析时的 home 目录）并排执行受管/原生两条查询，
//! 以纯文本报告返回结果。

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use storage_capabilities::FreeSpaceError;

use super::state::AppState;

/// 创建磁盘剩余空间 API 路由。
pub fn create_space_router() -> Router<Arc<AppState>> {
    Router::new()
        // 临时目录剩余空间报告
        .route("/api/space/temp", get(get_temp_folder_space))
        // 兼容历史路由（保留原有拼写）
        .route("/api/GetTempFolderAvaiableSpace", get(get_temp_folder_space))
}

/// 报告临时目录（以及可解析时的 home 目录）的剩余空间。
async fn get_temp_folder_space(
    state: axum::extract::State<Arc<AppState>>,
) -> Result<String, ApiError> {
    let report = state.probe.collect()?;
    Ok(report.render())
}

/// API 错误响应。
#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    error: String,
    code: String,
}

/// API 错误类型。
#[derive(Debug)]
struct ApiError {
    message: String,
    code: String,
    status: StatusCode,
}

impl From<FreeSpaceError> for ApiError {
    fn from(err: FreeSpaceError) -> Self {
        // 请求不携带任何输入，查询失败一律视为内部错误。
        let code = match &err {
            FreeSpaceError::EmptyPath | FreeSpaceError::InvalidPath(_) => "INVALID_PROBE_PATH",
            FreeSpaceError::VolumeNotFound(_) => "VOLUME_NOT_FOUND",
            FreeSpaceError::NativeCall { .. } => "NATIVE_CALL_FAILED",
        };

        ApiError {
            message: err.to_string(),
            code: code.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorResponse {
            error: self.message,
            code: self.code,
        });
        (self.status, body).into_response()
    }
}
