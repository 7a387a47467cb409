//! ファイル選択 → サムネイル描画 → 自動アップロード の流れ
//!
//! 状態はすべて `UploadSession` シグナルに集約する。
//! 選択の受付番号はデコード前に発行し、後から選ばれたファイルがあれば
//! 古い方のデコード結果は描画もアップロードもしない。

use crate::api::server;
use crate::thumbnail;
use face_match_common::{Applied, Role, SelectionTicket, UploadSession, WidgetError};
use leptos::prelude::*;
use web_sys::{File, HtmlCanvasElement, HtmlImageElement};

/// エラーをユーザーに通知（ページはそのまま使える）
pub fn report_error(error: &WidgetError) {
    gloo::console::error!(format!("{:?}", error));
    gloo::dialogs::alert(&error.to_string());
}

/// ファイルが選ばれたとき
///
/// デコードに失敗した場合は通知だけしてセッションは変えない。
pub async fn handle_file_selected(
    selection: SelectionTicket,
    file: File,
    canvas: HtmlCanvasElement,
    session: RwSignal<UploadSession>,
) {
    let decoded = thumbnail::decode_file(file).await;
    match render_selection(&selection, decoded, &canvas, session) {
        Ok(Applied::Current) => upload_role(selection.role().clone(), canvas, session).await,
        Ok(Applied::Stale) => {
            gloo::console::log!(format!(
                "superseded selection ignored: {} (#{})",
                selection.role(),
                selection.seq()
            ));
        }
        Err(error) => report_error(&error),
    }
}

/// デコード結果をCanvasに描き、枠を描画済みにする
///
/// より新しい選択があれば何もせず `Stale` を返す。
pub fn render_selection(
    selection: &SelectionTicket,
    decoded: Result<HtmlImageElement, String>,
    canvas: &HtmlCanvasElement,
    session: RwSignal<UploadSession>,
) -> Result<Applied, WidgetError> {
    if !session.with_untracked(|s| s.is_latest_selection(selection)) {
        return Ok(Applied::Stale);
    }

    let decode_error = |reason| WidgetError::Decode {
        role: selection.role().clone(),
        reason,
    };
    let image = decoded.map_err(decode_error)?;
    thumbnail::draw_thumbnail(canvas, &image).map_err(decode_error)?;

    Ok(session
        .try_update(|s| s.mark_rendered(selection))
        .unwrap_or(Applied::Stale))
}

/// Canvasの現在の内容をアップロード
pub async fn upload_role(role: Role, canvas: HtmlCanvasElement, session: RwSignal<UploadSession>) {
    let Some(ticket) = session.try_update(|s| s.begin_upload(&role)) else {
        return;
    };

    let outcome = match thumbnail::to_jpeg_blob(&canvas).await {
        Ok(blob) => server::upload_image(&role, &blob).await,
        Err(reason) => Err(WidgetError::Encode {
            role: role.clone(),
            reason,
        }),
    };

    match session.try_update(|s| s.finish_upload(&ticket, &outcome)) {
        Some(Applied::Current) => match &outcome {
            Ok(()) => gloo::console::log!(format!("uploaded: {} (#{})", role, ticket.seq())),
            Err(error) => report_error(error),
        },
        Some(Applied::Stale) => {
            gloo::console::log!(format!("stale upload result ignored: {} (#{})", role, ticket.seq()));
        }
        None => {}
    }
}
