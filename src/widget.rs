//! CLI版のアップロード枠と比較トリガー
//!
//! ブラウザ版と同じ `UploadSession` を使い、同じロールへの
//! 並行した選択では最後に選ばれたファイルだけを反映する。

use crate::client::FaceMatchClient;
use crate::error::{FaceMatchError, Result};
use crate::thumbnail;
use face_match_common::{Applied, ResultView, Role, UploadSession};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// アップロード1件の結末
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// ファイル未指定
    Skipped,
    Uploaded,
    /// より新しい選択・アップロードが始まっていたので捨てた
    Stale,
}

pub struct UploadWidget {
    client: FaceMatchClient,
    session: Mutex<UploadSession>,
    jpeg_quality: u8,
}

impl UploadWidget {
    pub fn new<I>(client: FaceMatchClient, roles: I, jpeg_quality: u8) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        Self {
            client,
            session: Mutex::new(UploadSession::with_roles(roles)),
            jpeg_quality,
        }
    }

    fn lock(&self) -> MutexGuard<'_, UploadSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 現在のセッション状態のコピー
    pub fn session(&self) -> UploadSession {
        self.lock().clone()
    }

    pub fn compare_enabled(&self) -> bool {
        self.lock().compare_enabled()
    }

    /// ファイルが選ばれたとき: デコード → サムネイル → 自動アップロード
    ///
    /// ファイルなしは何もしない。デコード失敗はアップロード前に中断する。
    pub async fn on_file_selected(&self, role: &Role, file: Option<&Path>) -> Result<UploadOutcome> {
        let Some(path) = file else {
            return Ok(UploadOutcome::Skipped);
        };

        // デコードを待つ前に受付番号を取る
        let selection = self.lock().select_file(role);

        let (task_role, task_path, quality) = (role.clone(), path.to_path_buf(), self.jpeg_quality);
        let jpeg = tokio::task::spawn_blocking(move || {
            thumbnail::load_thumbnail(&task_role, &task_path, quality)
        })
        .await??;
        tracing::debug!(%role, path = %path.display(), bytes = jpeg.len(), "thumbnail ready");

        if self.lock().mark_rendered(&selection) == Applied::Stale {
            tracing::info!(%role, seq = selection.seq(), "superseded selection ignored");
            return Ok(UploadOutcome::Stale);
        }
        self.upload_role(role, jpeg).await
    }

    /// サムネイルJPEGをアップロードし、結果をセッションに反映する
    pub async fn upload_role(&self, role: &Role, jpeg: Vec<u8>) -> Result<UploadOutcome> {
        let ticket = self.lock().begin_upload(role);

        let outcome = self.client.upload(role, jpeg).await;

        let applied = self.lock().finish_upload(&ticket, &outcome);
        match (applied, outcome) {
            (Applied::Stale, _) => {
                tracing::info!(%role, seq = ticket.seq(), "stale upload result ignored");
                Ok(UploadOutcome::Stale)
            }
            (Applied::Current, Ok(())) => {
                tracing::info!(%role, seq = ticket.seq(), "uploaded");
                Ok(UploadOutcome::Uploaded)
            }
            (Applied::Current, Err(error)) => {
                tracing::warn!(%role, %error, "upload failed");
                Err(error.into())
            }
        }
    }
}

/// 比較リクエストを出して表示モデルにする
pub struct CompareTrigger {
    client: FaceMatchClient,
}

impl CompareTrigger {
    pub fn new(client: FaceMatchClient) -> Self {
        Self { client }
    }

    /// セッション上で比較が有効なときだけ依頼する
    pub async fn on_compare_clicked(&self, session: &UploadSession) -> Result<ResultView> {
        if !session.compare_enabled() {
            return Err(FaceMatchError::CompareDisabled);
        }
        self.compare().await
    }

    /// セッションを持たない呼び出し（サーバー側の状態だけで比較）
    pub async fn compare(&self) -> Result<ResultView> {
        let result = self.client.compare().await?;
        tracing::debug!(candidates = result.all.len(), has_match = result.has_match(), "compare result");
        Ok(ResultView::from_result(&result))
    }
}
