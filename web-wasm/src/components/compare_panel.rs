//! 比較ボタンと結果表示

use crate::api::server;
use crate::widget::report_error;
use face_match_common::{ResultView, UploadSession, INSUFFICIENT_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ComparePanel(session: RwSignal<UploadSession>) -> impl IntoView {
    let (result_view, set_result_view) = signal(None::<ResultView>);
    let compare_enabled = move || session.with(|s| s.compare_enabled());

    let on_compare = move |_| {
        spawn_local(async move {
            match server::compare().await {
                Ok(result) => set_result_view.set(Some(ResultView::from_result(&result))),
                Err(error) => report_error(&error),
            }
        });
    };

    view! {
        <div class="compare">
            <button
                id="btn-compare"
                class="btn btn-primary"
                disabled=move || !compare_enabled()
                on:click=on_compare
            >
                "닮은 가족 찾기"
            </button>

            <Results rendered=result_view />
        </div>
    }
}

/// 比較結果の表示
///
/// 一致なしのときはメッセージだけを出す（見出しも一覧も出さない）。
#[component]
pub fn Results(rendered: ReadSignal<Option<ResultView>>) -> impl IntoView {
    view! {
        <div id="results">
            {move || rendered.get().map(|current| match current {
                ResultView::Ranked { headline, entries } => view! {
                    <h2>{headline}</h2>
                    {entries
                        .into_iter()
                        .map(|entry| view! { <p>{entry.text()}</p> })
                        .collect_view()}
                }
                .into_any(),
                ResultView::Insufficient => view! {
                    <p class="text-muted">{INSUFFICIENT_MESSAGE}</p>
                }
                .into_any(),
            })}
        </div>
    }
}
