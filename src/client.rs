//! `/upload` `/compare` のHTTPクライアント
//!
//! HTTPステータスでは判定せず、本文のJSONで成否を見る（拒否も本文で返るため）。

use crate::error::Result;
use face_match_common::{
    endpoint_url, parse_compare_response, parse_upload_response, ComparisonResult, Role,
    WidgetError, COMPARE_ENDPOINT, FIELD_IMAGE, FIELD_ROLE, JPEG_MIME, UPLOAD_ENDPOINT,
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FaceMatchClient {
    http: reqwest::Client,
    base_url: String,
}

impl FaceMatchClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// JPEGをmultipartで送る（`role`, `image` = `{role}.jpg`）
    pub async fn upload(&self, role: &Role, jpeg: Vec<u8>) -> std::result::Result<(), WidgetError> {
        let transport = |e: reqwest::Error| WidgetError::UploadTransport {
            role: role.clone(),
            reason: e.to_string(),
        };

        let image = Part::bytes(jpeg)
            .file_name(role.upload_file_name())
            .mime_str(JPEG_MIME)
            .map_err(transport)?;
        let form = Form::new()
            .text(FIELD_ROLE, role.as_str().to_string())
            .part(FIELD_IMAGE, image);

        let url = endpoint_url(&self.base_url, UPLOAD_ENDPOINT);
        tracing::debug!(%url, %role, "POST upload");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        tracing::debug!(%role, %status, "upload response");

        parse_upload_response(role, &body)
    }

    /// 比較を依頼（ボディなし）
    pub async fn compare(&self) -> std::result::Result<ComparisonResult, WidgetError> {
        let transport = |e: reqwest::Error| WidgetError::CompareTransport {
            reason: e.to_string(),
        };

        let url = endpoint_url(&self.base_url, COMPARE_ENDPOINT);
        tracing::debug!(%url, "POST compare");

        let response = self.http.post(&url).send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        tracing::debug!(%status, "compare response");

        parse_compare_response(&body)
    }
}
