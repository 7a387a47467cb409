//! サーバーとのやり取りの型定義
//!
//! - `POST /upload` (multipart: `role`, `image`)
//! - `POST /compare` (ボディなし)

use crate::error::{Result, WidgetError};
use crate::role::Role;
use serde::{Deserialize, Serialize};

pub const UPLOAD_ENDPOINT: &str = "/upload";
pub const COMPARE_ENDPOINT: &str = "/compare";

/// multipartのフィールド名
pub const FIELD_ROLE: &str = "role";
pub const FIELD_IMAGE: &str = "image";

pub const JPEG_MIME: &str = "image/jpeg";
pub const STATUS_OK: &str = "ok";

const UNKNOWN_REASON: &str = "알 수 없는 오류";

/// ベースURLとエンドポイントを連結する（ベースが空なら同一オリジン）
pub fn endpoint_url(base: &str, endpoint: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), endpoint)
}

/// `/upload` のレスポンス
///
/// 拒否時は `status` を持たず `error` だけ返すサーバーもある。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UploadResponse {
    pub fn ok(role: &Role) -> Self {
        Self {
            status: Some(STATUS_OK.to_string()),
            error: None,
            role: Some(role.clone()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }

    /// 拒否理由（サーバーの `error` を優先）
    pub fn rejection_reason(&self) -> String {
        match (&self.error, &self.status) {
            (Some(error), _) if !error.is_empty() => error.clone(),
            (_, Some(status)) => format!("status: {}", status),
            _ => UNKNOWN_REASON.to_string(),
        }
    }

    pub fn into_result(self, role: &Role) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(WidgetError::UploadRejected {
                role: role.clone(),
                reason: self.rejection_reason(),
            })
        }
    }
}

/// レスポンス本文から `/upload` の結果を判定
///
/// JSONとして読めない本文は通信エラー扱い。
pub fn parse_upload_response(role: &Role, body: &str) -> Result<()> {
    let response: UploadResponse =
        serde_json::from_str(body).map_err(|e| WidgetError::UploadTransport {
            role: role.clone(),
            reason: format!("응답을 해석할 수 없습니다: {}", e),
        })?;
    response.into_result(role)
}

/// 比較候補1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub label: String,
    pub similarity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Match {
    pub fn new(label: impl Into<String>, similarity: f64) -> Self {
        Self {
            label: label.into(),
            similarity,
            role: None,
        }
    }
}

/// `/compare` の結果
///
/// `all` はサーバーの並び順のまま保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(default)]
    pub best_match: Option<Match>,
    #[serde(default)]
    pub all: Vec<Match>,
}

impl ComparisonResult {
    pub fn has_match(&self) -> bool {
        self.best_match.is_some()
    }
}

#[derive(Deserialize)]
struct CompareEnvelope {
    #[serde(flatten)]
    result: ComparisonResult,
    #[serde(default)]
    error: Option<String>,
}

/// レスポンス本文から `/compare` の結果を取り出す
pub fn parse_compare_response(body: &str) -> Result<ComparisonResult> {
    let envelope: CompareEnvelope =
        serde_json::from_str(body).map_err(|e| WidgetError::CompareTransport {
            reason: format!("응답을 해석할 수 없습니다: {}", e),
        })?;

    match envelope.error {
        Some(error) if envelope.result.best_match.is_none() => {
            Err(WidgetError::CompareRejected { reason: error })
        }
        _ => Ok(envelope.result),
    }
}
