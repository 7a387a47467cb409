//! ロール枠コンポーネント
//!
//! ファイル入力・サムネイルCanvas・アップロードボタンを1組で持つ。

use crate::widget::{handle_file_selected, upload_role};
use face_match_common::{Role, SlotState, UploadSession};
use leptos::html::Canvas;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

#[component]
pub fn RoleSlot(role: Role, session: RwSignal<UploadSession>) -> impl IntoView {
    let canvas_ref = NodeRef::<Canvas>::new();

    let state = {
        let role = role.clone();
        move || session.with(|s| s.state(&role))
    };
    let upload_enabled = {
        let role = role.clone();
        move || session.with(|s| s.upload_enabled(&role))
    };

    let on_change = {
        let role = role.clone();
        move |ev: web_sys::Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            // キャンセル時はファイルなし
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");

            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            // デコードを待つ前に選択順を確定する
            let Some(selection) = session.try_update(|s| s.select_file(&role)) else {
                return;
            };
            spawn_local(handle_file_selected(selection, file, canvas, session));
        }
    };

    let on_upload = {
        let role = role.clone();
        move |_| {
            if let Some(canvas) = canvas_ref.get_untracked() {
                spawn_local(upload_role(role.clone(), canvas, session));
            }
        }
    };

    let status_state = state.clone();
    let label_state = state.clone();
    let button_state = state.clone();

    view! {
        <div class="role" data-role=role.as_str().to_string()>
            <h3>{role.label().to_string()}</h3>
            <input type="file" accept="image/*" on:change=on_change />
            <canvas
                node_ref=canvas_ref
                width="224"
                height="224"
                style:display=move || if state() == SlotState::Empty { "none" } else { "block" }
            />
            <button
                class="btn btn-upload"
                disabled=move || !upload_enabled()
                on:click=on_upload
            >
                {move || match button_state() {
                    SlotState::Uploading => "업로드 중...",
                    SlotState::Uploaded => "업로드 완료",
                    _ => "업로드",
                }}
            </button>
            <span class=move || format!("upload-status {}", status_state().as_str())>
                {move || match label_state() {
                    SlotState::Empty => "사진 없음",
                    SlotState::Rendering => "준비됨",
                    SlotState::Uploading => "전송 중",
                    SlotState::Uploaded => "완료",
                    SlotState::UploadFailed => "실패",
                }}
            </span>
        </div>
    }
}
