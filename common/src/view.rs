//! 比較結果の表示モデル
//!
//! 見出し（最も似ている家族）と全候補の一覧。並び替えはしない。

use crate::protocol::ComparisonResult;

pub const INSUFFICIENT_MESSAGE: &str = "비교할 사진이 부족합니다.";

/// 類似度をパーセント表記用に整形（87.0 → "87"）
pub fn format_similarity(similarity: f64) -> String {
    if similarity == 0.0 {
        // -0 を "0" に揃える
        return "0".to_string();
    }
    format!("{}", similarity)
}

/// 一覧の1行
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub label: String,
    pub percent: String,
}

impl ResultEntry {
    pub fn text(&self) -> String {
        format!("{}: {}%", self.label, self.percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Ranked {
        headline: String,
        entries: Vec<ResultEntry>,
    },
    Insufficient,
}

impl ResultView {
    pub fn from_result(result: &ComparisonResult) -> Self {
        let Some(best) = &result.best_match else {
            return ResultView::Insufficient;
        };

        let headline = format!(
            "가장 닮은 가족: {} ({}%)",
            best.label,
            format_similarity(best.similarity)
        );
        let entries = result
            .all
            .iter()
            .map(|m| ResultEntry {
                label: m.label.clone(),
                percent: format_similarity(m.similarity),
            })
            .collect();

        ResultView::Ranked { headline, entries }
    }

    /// CLI出力用のテキスト
    pub fn to_text(&self) -> String {
        match self {
            ResultView::Ranked { headline, entries } => {
                let mut lines = vec![headline.clone()];
                lines.extend(entries.iter().map(|e| format!("  {}", e.text())));
                lines.join("\n")
            }
            ResultView::Insufficient => INSUFFICIENT_MESSAGE.to_string(),
        }
    }
}
