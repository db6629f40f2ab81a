use super::PageProps;
use super::utils::{render_view, sync_unload_guard};
use crate::api::dispatch;
use gloo_events::EventListener;
use shared::pages::generator::GeneratorForm;
use shared::{
    Controller, GeneratorPage, HttpResponse, SubmitRejected, TransportError, ValidationError,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Prompt,
    Steps,
    Guidance,
    Width,
    Height,
    ModelId,
    Seed,
}

pub enum Msg {
    Field(Field, String),
    ToggleSettings,
    Submit,
    Regenerate,
    Reset,
    Completed(Result<HttpResponse, TransportError>),
}

pub struct Generator {
    controller: Controller<GeneratorPage>,
    form: GeneratorForm,
    has_submitted: bool,
    show_settings: bool,
    root: NodeRef,
    _shortcuts: Option<EventListener>,
    unload_guard: Option<EventListener>,
}

impl Generator {
    fn submit(&mut self, ctx: &Context<Self>) -> bool {
        match self.controller.begin(&self.form) {
            Ok(request) => {
                self.has_submitted = true;
                sync_unload_guard(&mut self.unload_guard, self.controller.controls().confirm_unload);
                dispatch(ctx.link(), &ctx.props().transport, request, Msg::Completed);
                true
            }
            Err(SubmitRejected::Busy) => false,
            Err(e) => {
                log::warn!("Generation not sent: {}", e);
                true
            }
        }
    }

    fn set_field(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Prompt => &mut self.form.prompt,
            Field::Steps => &mut self.form.steps,
            Field::Guidance => &mut self.form.guidance,
            Field::Width => &mut self.form.width,
            Field::Height => &mut self.form.height,
            Field::ModelId => &mut self.form.model_id,
            Field::Seed => &mut self.form.seed,
        };
        *slot = value;
    }

    fn prompt_hint(&self) -> Option<String> {
        let min = self.controller.page().config().prompt_min;
        let length = self.form.prompt.trim().chars().count();
        (length > 0 && length < min).then(|| ValidationError::PromptTooShort { min }.to_string())
    }

    fn render_settings(&self, ctx: &Context<Self>) -> Html {
        if !self.show_settings {
            return html! {};
        }
        let bounds = self.controller.page().config().bounds;
        let number = |id: &'static str,
                      label: &'static str,
                      field: Field,
                      value: &str,
                      (min, max): (String, String),
                      step: &'static str| {
            html! {
                <div class="setting">
                    <label for={id}>{ label }</label>
                    <input
                        type="number"
                        id={id}
                        min={min}
                        max={max}
                        step={step}
                        value={value.to_string()}
                        oninput={input_callback(ctx, field)}
                    />
                </div>
            }
        };

        html! {
            <div class="advanced-settings">
                { number("steps", "추론 단계", Field::Steps, &self.form.steps,
                    range(bounds.steps), "1") }
                { number("guidance", "가이던스 스케일", Field::Guidance, &self.form.guidance,
                    range(bounds.guidance), "0.5") }
                { number("width", "너비", Field::Width, &self.form.width,
                    range(bounds.size), "64") }
                { number("height", "높이", Field::Height, &self.form.height,
                    range(bounds.size), "64") }
                <div class="setting">
                    <label for="model">{"모델"}</label>
                    <input
                        type="text"
                        id="model"
                        value={self.form.model_id.clone()}
                        oninput={input_callback(ctx, Field::ModelId)}
                    />
                </div>
                <div class="setting">
                    <label for="seed">{"시드 (선택)"}</label>
                    <input
                        type="number"
                        id="seed"
                        placeholder="무작위"
                        value={self.form.seed.clone()}
                        oninput={input_callback(ctx, Field::Seed)}
                    />
                </div>
            </div>
        }
    }
}

fn range<T: ToString>((min, max): (T, T)) -> (String, String) {
    (min.to_string(), max.to_string())
}

fn input_callback(ctx: &Context<Generator>, field: Field) -> Callback<InputEvent> {
    ctx.link().callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Field(field, input.value())
    })
}

/// Ctrl/Cmd+Enter generates, Escape resets. Ignored while the page is hidden.
fn keyboard_shortcuts(ctx: &Context<Generator>, root: NodeRef) -> Option<EventListener> {
    let Some(window) = web_sys::window() else {
        log::warn!("No window; keyboard shortcuts disabled");
        return None;
    };
    let link = ctx.link().clone();
    let listener = EventListener::new(&window, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let visible = root
            .cast::<HtmlElement>()
            .is_some_and(|el| el.offset_parent().is_some());
        if !visible {
            return;
        }
        match key.key().as_str() {
            "Enter" if key.ctrl_key() || key.meta_key() => {
                key.prevent_default();
                link.send_message(Msg::Submit);
            }
            "Escape" => link.send_message(Msg::Reset),
            _ => {}
        }
    });
    Some(listener)
}

impl Component for Generator {
    type Message = Msg;
    type Properties = PageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ctx.props().config.generator.clone();
        let root = NodeRef::default();
        Self {
            form: GeneratorForm::from_config(&config),
            controller: Controller::new(GeneratorPage::new(config)),
            has_submitted: false,
            show_settings: false,
            _shortcuts: keyboard_shortcuts(ctx, root.clone()),
            unload_guard: None,
            root,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Field(field, value) => {
                self.set_field(field, value);
                true
            }
            Msg::ToggleSettings => {
                self.show_settings = !self.show_settings;
                true
            }
            Msg::Submit => self.submit(ctx),
            // Same as generate, with whatever the form holds now.
            Msg::Regenerate => self.has_submitted && self.submit(ctx),
            Msg::Reset => {
                if !self.controller.reset() {
                    return false;
                }
                self.form = GeneratorForm::from_config(self.controller.page().config());
                self.has_submitted = false;
                self.show_settings = false;
                true
            }
            Msg::Completed(outcome) => {
                self.controller.complete(outcome);
                sync_unload_guard(&mut self.unload_guard, self.controller.controls().confirm_unload);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let controls = self.controller.controls();
        let prompt_max = self.controller.page().config().prompt_max;
        let can_regenerate = self.has_submitted && !controls.submit_disabled;

        html! {
            <div class="generator" ref={self.root.clone()}>
                <h2><i class="fa-solid fa-palette"></i>{" 이미지 생성"}</h2>
                <div class="prompt-section">
                    <label for="prompt">{"프롬프트"}</label>
                    <textarea
                        id="prompt"
                        rows="4"
                        maxlength={prompt_max.to_string()}
                        value={self.form.prompt.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlTextAreaElement = e.target_unchecked_into();
                            Msg::Field(Field::Prompt, input.value())
                        })}
                    />
                    <div class="prompt-footer">
                        <span class="char-count">
                            { format!("{}/{}", self.form.prompt.chars().count(), prompt_max) }
                        </span>
                        if let Some(hint) = self.prompt_hint() {
                            <span class="prompt-hint">{ hint }</span>
                        }
                    </div>
                </div>

                <button class="settings-toggle" onclick={link.callback(|_| Msg::ToggleSettings)}>
                    <i class={classes!("fa-solid", if self.show_settings { "fa-chevron-up" } else { "fa-chevron-down" })}></i>
                    {" 고급 설정"}
                </button>
                { self.render_settings(ctx) }

                <div class="button-container">
                    <button
                        id="generateBtn"
                        class="analyze-btn"
                        disabled={controls.submit_disabled}
                        onclick={link.callback(|_| Msg::Submit)}
                    >
                        <i class="fa-solid fa-wand-magic-sparkles"></i>
                        { if controls.show_loading { " 생성 중..." } else { " 이미지 생성" } }
                    </button>
                    <button
                        id="regenerateBtn"
                        class="analyze-btn"
                        disabled={!can_regenerate}
                        onclick={link.callback(|_| Msg::Regenerate)}
                    >
                        <i class="fa-solid fa-rotate"></i>{" 다시 생성"}
                    </button>
                    <button
                        id="resetBtn"
                        class="analyze-btn"
                        style="background-color: var(--clear-color);"
                        disabled={controls.submit_disabled}
                        onclick={link.callback(|_| Msg::Reset)}
                    >
                        <i class="fa-solid fa-eraser"></i>{" 초기화"}
                    </button>
                </div>
                <p class="shortcut-hint">{"Ctrl/Cmd + Enter: 생성 · Esc: 초기화"}</p>

                <div id="result" class={classes!("result-panel", self.controller.state().name())}>
                    { render_view(&self.controller.view()) }
                </div>
            </div>
        }
    }
}
