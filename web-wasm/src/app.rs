//! メインアプリケーションコンポーネント

use crate::components::{compare_panel::ComparePanel, header::Header, role_slot::RoleSlot};
use face_match_common::{default_roles, parse_role_list, Role, UploadSession};
use leptos::prelude::*;

/// ページが `<body data-roles="child,father,...">` で指定したロール一覧
fn page_roles() -> Vec<Role> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|body| body.get_attribute("data-roles"))
        .map(|spec| parse_role_list(&spec))
        .unwrap_or_else(default_roles)
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let roles = page_roles();
    // セッション状態はウィジェットが1つだけ持つ
    let session = RwSignal::new(UploadSession::with_roles(roles.clone()));

    view! {
        <div class="container">
            <Header />

            <div class="roles">
                {roles
                    .into_iter()
                    .map(|role| view! { <RoleSlot role=role session=session /> })
                    .collect_view()}
            </div>

            <ComparePanel session=session />
        </div>
    }
}
