//! 画像ファイルから224×224のJPEGサムネイルを作る

use crate::error::{FaceMatchError, Result};
use face_match_common::{cover_crop, Role, WidgetError, THUMBNAIL_SIZE};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;

/// 中央切り出し + 縮小
pub fn fit_thumbnail(image: &DynamicImage) -> Option<DynamicImage> {
    let crop = cover_crop(image.width(), image.height())?;
    Some(
        image
            .crop_imm(crop.x, crop.y, crop.width, crop.height)
            .resize_exact(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3),
    )
}

/// バイト列をデコードしてJPEGサムネイルにする
pub fn thumbnail_jpeg(role: &Role, bytes: &[u8], quality: u8) -> std::result::Result<Vec<u8>, WidgetError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| WidgetError::Decode {
        role: role.clone(),
        reason: e.to_string(),
    })?;
    let thumb = fit_thumbnail(&decoded).ok_or_else(|| WidgetError::Decode {
        role: role.clone(),
        reason: "이미지 크기가 0입니다".to_string(),
    })?;

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode_image(&thumb.to_rgb8())
        .map_err(|e| WidgetError::Encode {
            role: role.clone(),
            reason: e.to_string(),
        })?;
    Ok(jpeg)
}

/// ファイルを読み込んでサムネイルにする
pub fn load_thumbnail(role: &Role, path: &Path, quality: u8) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(FaceMatchError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    Ok(thumbnail_jpeg(role, &bytes, quality)?)
}
