//! `/upload` と `/compare` の呼び出し（同一オリジン）
//!
//! HTTPステータスでは判定しない。拒否応答もJSON本文で返ってくるため、
//! 本文の `status` / `error` / `best_match` を見る。

use face_match_common::{
    parse_compare_response, parse_upload_response, ComparisonResult, Role, WidgetError,
    COMPARE_ENDPOINT, FIELD_IMAGE, FIELD_ROLE, UPLOAD_ENDPOINT,
};
use gloo::net::http::Request;
use web_sys::{Blob, FormData};

/// JPEG画像をmultipartでアップロード
pub async fn upload_image(role: &Role, image: &Blob) -> Result<(), WidgetError> {
    let transport = |reason: String| WidgetError::UploadTransport {
        role: role.clone(),
        reason,
    };

    let form = FormData::new().map_err(|e| transport(format!("{:?}", e)))?;
    form.append_with_str(FIELD_ROLE, role.as_str())
        .map_err(|e| transport(format!("{:?}", e)))?;
    form.append_with_blob_and_filename(FIELD_IMAGE, image, &role.upload_file_name())
        .map_err(|e| transport(format!("{:?}", e)))?;

    let response = Request::post(UPLOAD_ENDPOINT)
        .body(form)
        .map_err(|e| transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| transport(e.to_string()))?;

    let body = response.text().await.map_err(|e| transport(e.to_string()))?;
    parse_upload_response(role, &body)
}

/// アップロード済みの写真で比較を依頼
pub async fn compare() -> Result<ComparisonResult, WidgetError> {
    let transport = |reason: String| WidgetError::CompareTransport { reason };

    let response = Request::post(COMPARE_ENDPOINT)
        .send()
        .await
        .map_err(|e| transport(e.to_string()))?;

    let body = response.text().await.map_err(|e| transport(e.to_string()))?;
    parse_compare_response(&body)
}
