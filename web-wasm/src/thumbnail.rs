//! Canvasへのサムネイル描画とJPEG化
//!
//! - decode_file: File → HtmlImageElement（デコード完了まで待つ）
//! - draw_thumbnail: 中央を切り出して224×224で描画
//! - to_jpeg_blob: Canvasの内容をJPEG Blobにする

use face_match_common::{cover_crop, DEFAULT_JPEG_QUALITY, JPEG_MIME, THUMBNAIL_SIZE};
use gloo::file::ObjectUrl;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, CanvasRenderingContext2d, File, HtmlCanvasElement, HtmlImageElement};

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

/// ファイルを画像としてデコードする
///
/// ObjectURLはデコード完了後に解放される。
pub async fn decode_file(file: File) -> Result<HtmlImageElement, String> {
    let url = ObjectUrl::from(gloo::file::File::from(file));
    let image = HtmlImageElement::new().map_err(|e| js_reason(&e))?;
    image.set_src(&url);

    JsFuture::from(image.decode())
        .await
        .map_err(|e| js_reason(&e))?;

    if image.natural_width() == 0 || image.natural_height() == 0 {
        return Err("이미지 크기가 0입니다".to_string());
    }
    Ok(image)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, String> {
    canvas
        .get_context("2d")
        .map_err(|e| js_reason(&e))?
        .ok_or_else(|| "2D 컨텍스트를 사용할 수 없습니다".to_string())?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|e| js_reason(&e))
}

/// 224×224に切り出して描画する（以前の内容は消える）
///
/// サイズ変更でCanvasが消えるので、失敗しうる準備を先に済ませる。
pub fn draw_thumbnail(canvas: &HtmlCanvasElement, image: &HtmlImageElement) -> Result<(), String> {
    let crop = cover_crop(image.natural_width(), image.natural_height())
        .ok_or_else(|| "이미지 크기가 0입니다".to_string())?;
    let ctx = context_2d(canvas)?;

    canvas.set_width(THUMBNAIL_SIZE);
    canvas.set_height(THUMBNAIL_SIZE);

    let size = f64::from(THUMBNAIL_SIZE);
    ctx.clear_rect(0.0, 0.0, size, size);

    let (sx, sy, sw, sh) = crop.as_f64();
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        image, sx, sy, sw, sh, 0.0, 0.0, size, size,
    )
    .map_err(|e| js_reason(&e))
}

/// Canvasの内容をJPEG Blobに変換する
pub async fn to_jpeg_blob(canvas: &HtmlCanvasElement) -> Result<Blob, String> {
    let quality = JsValue::from_f64(f64::from(DEFAULT_JPEG_QUALITY) / 100.0);
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) = canvas.to_blob_with_type_and_encoder_options(&resolve, JPEG_MIME, &quality)
        {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    let value = JsFuture::from(promise).await.map_err(|e| js_reason(&e))?;
    value
        .dyn_into::<Blob>()
        .map_err(|_| "JPEG 데이터를 만들 수 없습니다".to_string())
}
