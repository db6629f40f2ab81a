use shared::PageKind;
use strum::IntoEnumIterator;
use yew::prelude::*;

fn page_icon(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Predictor => "fa-solid fa-pen",
        PageKind::Chat => "fa-solid fa-comments",
        PageKind::Analyzer => "fa-solid fa-magnifying-glass",
        PageKind::Generator => "fa-solid fa-wand-magic-sparkles",
    }
}

/// Renders the application header with one tab per page
pub fn render_header(active: PageKind, on_select: Callback<PageKind>) -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-brain"></i> {" AI 추론 데모"}</h1>
            <p class="subtitle">{"그리기, 대화, 분석, 생성을 한 곳에서"}</p>
            <nav class="page-tabs">
                { for PageKind::iter().map(|kind| {
                    let on_select = on_select.clone();
                    html! {
                        <button
                            class={classes!("tab", (kind == active).then_some("active"))}
                            onclick={Callback::from(move |_| on_select.emit(kind))}
                        >
                            <i class={page_icon(kind)}></i>{ format!(" {}", kind) }
                        </button>
                    }
                })}
            </nav>
        </header>
    }
}
