//! サムネイル寸法の計算
//!
//! 元画像の短辺に合わせて中央を正方形に切り出し、224×224に縮小する。
//! Canvas描画（WASM）とimageクレート（CLI）の両方で同じ切り出しを使う。

/// サムネイルの一辺（px）
pub const THUMBNAIL_SIZE: u32 = 224;

/// JPEG品質（ブラウザの `toBlob` 既定値と同じ 0.92）
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// 元画像上の切り出し範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Canvasの `drawImage` 用 (sx, sy, sw, sh)
    pub fn as_f64(&self) -> (f64, f64, f64, f64) {
        (
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.width),
            f64::from(self.height),
        )
    }
}

/// 中央正方形の切り出し範囲を返す。幅か高さが0ならNone。
pub fn cover_crop(width: u32, height: u32) -> Option<CropRect> {
    if width == 0 || height == 0 {
        return None;
    }
    let side = width.min(height);
    Some(CropRect {
        x: (width - side) / 2,
        y: (height - side) / 2,
        width: side,
        height: side,
    })
}
