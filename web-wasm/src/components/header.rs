//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"우리 아이는 누구를 닮았을까?"</h1>
            <p class="text-muted">"아이 사진과 가족 사진을 올린 뒤 비교해 보세요"</p>
        </header>
    }
}
