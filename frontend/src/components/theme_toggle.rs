use super::super::{App, Msg, Theme};
use yew::html::Scope;
use yew::prelude::*;

pub fn render_theme_toggle(theme: Theme, link: &Scope<App>) -> Html {
    html! {
        <button
            id="theme-toggle"
            class="theme-toggle"
            onclick={link.callback(|_| Msg::ToggleTheme)}
            title={ if theme == Theme::Light { "다크 모드로 전환" } else { "라이트 모드로 전환" } }
        >
            { if theme == Theme::Light {
                html! { <img src="https://cdnjs.cloudflare.com/ajax/libs/twemoji/14.0.2/svg/2600.svg" alt="Sun Icon" class="toggle-icon" /> }
            } else {
                html! { <img src="https://cdnjs.cloudflare.com/ajax/libs/twemoji/14.0.2/svg/1f319.svg" alt="Moon Icon" class="toggle-icon" /> }
            }}
        </button>
    }
}
