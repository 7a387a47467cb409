//! エラー型定義
//!
//! ユーザーに表示するメッセージは `Display` そのもの。

use crate::role::Role;
use thiserror::Error;

/// エラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 画像として読めない・変換できない
    Input,
    /// 通信失敗・応答が読めない
    Transport,
    /// サーバーが拒否した
    ServerRejection,
}

/// ウィジェット共通エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("{role} 사진을 이미지로 읽을 수 없습니다: {reason}")]
    Decode { role: Role, reason: String },

    #[error("{role} 사진을 JPEG로 변환하지 못했습니다: {reason}")]
    Encode { role: Role, reason: String },

    #[error("{role} 업로드 실패 (네트워크 오류): {reason}")]
    UploadTransport { role: Role, reason: String },

    #[error("{role} 업로드 실패: {reason}")]
    UploadRejected { role: Role, reason: String },

    #[error("비교 요청 중 오류가 발생했습니다: {reason}")]
    CompareTransport { reason: String },

    #[error("비교 실패: {reason}")]
    CompareRejected { reason: String },
}

impl WidgetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WidgetError::Decode { .. } | WidgetError::Encode { .. } => ErrorKind::Input,
            WidgetError::UploadTransport { .. } | WidgetError::CompareTransport { .. } => {
                ErrorKind::Transport
            }
            WidgetError::UploadRejected { .. } | WidgetError::CompareRejected { .. } => {
                ErrorKind::ServerRejection
            }
        }
    }

    /// 対象ロール（比較リクエストの場合はNone）
    pub fn role(&self) -> Option<&Role> {
        match self {
            WidgetError::Decode { role, .. }
            | WidgetError::Encode { role, .. }
            | WidgetError::UploadTransport { role, .. }
            | WidgetError::UploadRejected { role, .. } => Some(role),
            WidgetError::CompareTransport { .. } | WidgetError::CompareRejected { .. } => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, WidgetError>;
