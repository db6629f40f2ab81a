use super::PageProps;
use super::utils::{current_time, render_notice, render_view, sync_unload_guard};
use crate::api::dispatch;
use gloo_events::EventListener;
use shared::pages::chat::{Transcript, WELCOME_MESSAGE};
use shared::{ChatPage, Controller, HttpResponse, SubmitRejected, TransportError, UiState};
use web_sys::{HtmlTextAreaElement, KeyboardEvent};
use yew::prelude::*;

pub enum Msg {
    Input(String),
    Send,
    KeyDown(KeyboardEvent),
    Completed(Result<HttpResponse, TransportError>),
}

pub struct Chat {
    controller: Controller<ChatPage>,
    transcript: Transcript,
    draft: String,
    notice: Option<String>,
    input: NodeRef,
    unload_guard: Option<EventListener>,
}

impl Chat {
    fn send(&mut self, ctx: &Context<Self>) -> bool {
        match self.controller.begin(&self.draft) {
            Ok(request) => {
                self.transcript.push_user(self.draft.trim(), current_time());
                self.draft.clear();
                self.notice = None;
                sync_unload_guard(&mut self.unload_guard, self.controller.controls().confirm_unload);
                dispatch(ctx.link(), &ctx.props().transport, request, Msg::Completed);
                true
            }
            Err(SubmitRejected::Busy) => false,
            Err(e) => {
                // Local rejections go to the notice line, not the transcript.
                self.controller.reset();
                self.notice = Some(e.to_string());
                true
            }
        }
    }

    fn record_reply(&mut self) {
        match self.controller.state() {
            UiState::Success(reply) => {
                let time = if reply.timestamp.is_empty() {
                    current_time()
                } else {
                    reply.timestamp.clone()
                };
                self.transcript.push_bot(reply.text.clone(), time);
            }
            UiState::Error(message) => self.transcript.push_bot(message.clone(), current_time()),
            UiState::Idle | UiState::Busy => return,
        }
        self.controller.reset();
    }

    fn focus_input(&self) {
        if let Some(input) = self.input.cast::<HtmlTextAreaElement>() {
            if let Err(e) = input.focus() {
                log::warn!("Failed to focus message input: {:?}", e);
            }
        }
    }
}

impl Component for Chat {
    type Message = Msg;
    type Properties = PageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_bot(WELCOME_MESSAGE, current_time());

        Self {
            controller: Controller::new(ChatPage::new(ctx.props().config.chat.clone())),
            transcript,
            draft: String::new(),
            notice: None,
            input: NodeRef::default(),
            unload_guard: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(value) => {
                self.draft = value;
                self.notice = None;
                true
            }
            Msg::Send => self.send(ctx),
            Msg::KeyDown(e) => match e.key().as_str() {
                "Enter" if !e.shift_key() => {
                    e.prevent_default();
                    self.send(ctx)
                }
                "Escape" => {
                    self.draft.clear();
                    self.notice = None;
                    true
                }
                _ => false,
            },
            Msg::Completed(outcome) => {
                self.controller.complete(outcome);
                self.record_reply();
                sync_unload_guard(&mut self.unload_guard, self.controller.controls().confirm_unload);
                self.focus_input();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let page = self.controller.page();
        let controls = self.controller.controls();
        let length = self.draft.chars().count();

        html! {
            <div class="chat">
                <h2><i class="fa-solid fa-comments"></i>{" 챗봇과 대화하기"}</h2>
                <div class="chat-window">
                    { render_view(&self.transcript.render()) }
                    if controls.show_loading {
                        { render_view(&self.controller.view()) }
                    }
                </div>
                { render_notice(self.notice.as_deref()) }
                <div class="chat-input">
                    <textarea
                        id="messageInput"
                        ref={self.input.clone()}
                        rows="2"
                        maxlength={page.max_length().to_string()}
                        placeholder="메시지를 입력하세요... (Enter: 전송, Shift+Enter: 줄바꿈)"
                        value={self.draft.clone()}
                        disabled={controls.submit_disabled}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlTextAreaElement = e.target_unchecked_into();
                            Msg::Input(input.value())
                        })}
                        onkeydown={link.callback(Msg::KeyDown)}
                    />
                    <div class="chat-input-footer">
                        <span id="charCount" class={page.char_count_class(length)}>
                            { page.char_count_label(length) }
                        </span>
                        <button
                            id="sendBtn"
                            class="analyze-btn"
                            disabled={controls.submit_disabled}
                            onclick={link.callback(|_| Msg::Send)}
                        >
                            <i class="fa-solid fa-paper-plane"></i>{" 전송"}
                        </button>
                    </div>
                </div>
            </div>
        }
    }
}
