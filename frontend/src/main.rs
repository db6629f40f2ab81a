mod api;
mod components;

use api::GlooTransport;
use components::analyzer::Analyzer;
use components::chat::Chat;
use components::generator::Generator;
use components::header::render_header;
use components::predictor::Predictor;
use components::theme_toggle::render_theme_toggle;
use shared::{ClientConfig, PageKind};
use std::rc::Rc;
use yew::prelude::*;

const CLIENT_CONFIG: &str = include_str!("../../config/client.yaml");

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Light,
    Dark,
}

pub enum Msg {
    SelectPage(PageKind),
    ToggleTheme,
}

// Main component
pub struct App {
    config: Rc<ClientConfig>,
    transport: GlooTransport,
    active: PageKind,
    theme: Theme,
}

fn load_config() -> ClientConfig {
    match ClientConfig::from_yaml_str(CLIENT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}; falling back to built-in defaults", e);
            ClientConfig::default()
        }
    }
}

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        log::warn!("No document body to apply theme to");
        return;
    };
    if let Err(e) = body.class_list().toggle_with_force("dark-mode", theme == Theme::Dark) {
        log::warn!("Failed to switch theme: {:?}", e);
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = load_config();
        let transport = GlooTransport::new(config.api_base.clone());
        let theme = if prefers_dark() { Theme::Dark } else { Theme::Light };
        apply_theme(theme);

        Self {
            config: Rc::new(config),
            transport,
            active: PageKind::Predictor,
            theme,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectPage(kind) => {
                if self.active == kind {
                    return false;
                }
                log::info!("Switching to {:?}", kind);
                self.active = kind;
                true
            }
            Msg::ToggleTheme => {
                self.theme = match self.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
                apply_theme(self.theme);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let config = self.config.clone();
        let transport = self.transport.clone();
        // Pages stay mounted so an in-flight request survives a tab switch.
        let section = |kind: PageKind, page: Html| {
            html! {
                <section class={classes!("page", (kind != self.active).then_some("hidden"))}>
                    { page }
                </section>
            }
        };

        html! {
            <div class="container">
                { render_header(self.active, link.callback(Msg::SelectPage)) }
                <div class="top-right">
                    { render_theme_toggle(self.theme, link) }
                </div>

                <main class="main-content">
                    { section(PageKind::Predictor, html! {
                        <Predictor config={config.clone()} transport={transport.clone()} />
                    }) }
                    { section(PageKind::Chat, html! {
                        <Chat config={config.clone()} transport={transport.clone()} />
                    }) }
                    { section(PageKind::Analyzer, html! {
                        <Analyzer config={config.clone()} transport={transport.clone()} />
                    }) }
                    { section(PageKind::Generator, html! {
                        <Generator config={config} transport={transport} />
                    }) }
                </main>

                <footer class="app-footer">
                    <p>{"Inference Pages | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
