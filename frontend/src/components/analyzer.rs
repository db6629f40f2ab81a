use super::PageProps;
use super::utils::{debounce, extract_image_files, render_notice, render_view};
use crate::api::dispatch;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::pages::analyzer::{AnalyzeForm, ImageFile};
use shared::{AnalyzerPage, Controller, HttpResponse, SubmitRejected, TransportError};
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub enum Msg {
    FileChosen(GlooFile),
    FileLoaded(ImageFile, ObjectUrl),
    FileFailed(String),
    UrlChanged(String),
    SetDragging(bool),
    HandleDrop(DragEvent),
    Submit,
    Completed(Result<HttpResponse, TransportError>),
}

/// What the drop zone shows: a picked file or the typed image URL.
enum Preview<'a> {
    File(&'a ObjectUrl),
    Remote(&'a str),
}

impl Preview<'_> {
    fn src(&self) -> String {
        match self {
            Preview::File(url) => url.to_string(),
            Preview::Remote(url) => url.to_string(),
        }
    }
}

pub struct Analyzer {
    controller: Controller<AnalyzerPage>,
    form: AnalyzeForm,
    file_preview: Option<ObjectUrl>,
    is_dragging: bool,
    notice: Option<String>,
    file_input: NodeRef,
}

impl Analyzer {
    fn preview(&self) -> Option<Preview<'_>> {
        match &self.file_preview {
            Some(url) if self.form.file.is_some() => Some(Preview::File(url)),
            _ => self.form.url_preview().map(Preview::Remote),
        }
    }

    fn load_file(ctx: &Context<Self>, file: GlooFile) {
        let link = ctx.link().clone();
        spawn_local(async move {
            match gloo_file::futures::read_as_bytes(&file).await {
                Ok(bytes) => {
                    let image = ImageFile {
                        name: file.name(),
                        mime_type: file.raw_mime_type(),
                        bytes,
                    };
                    link.send_message(Msg::FileLoaded(image, ObjectUrl::from(file)));
                }
                Err(e) => {
                    log::error!("Failed to read {}: {}", file.name(), e);
                    link.send_message(Msg::FileFailed(format!(
                        "파일을 읽을 수 없습니다: {}",
                        file.name()
                    )));
                }
            }
        });
    }

    fn render_drop_zone(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let handle_change = link.batch_callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input
                .files()
                .as_ref()
                .map(extract_image_files)
                .and_then(|files| files.into_iter().next());
            input.set_value("");
            file.map(Msg::FileChosen)
        });

        let handle_drag_over = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::SetDragging(true)
        });

        let handle_drag_leave = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::SetDragging(false)
        });

        let file_input = self.file_input.clone();
        let trigger_file_input = move || {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        };

        html! {
            <>
                <input
                    type="file"
                    id="imageFile"
                    ref={self.file_input.clone()}
                    accept="image/*"
                    style="display: none;"
                    onchange={handle_change}
                />
                <div
                    id="drop-zone"
                    class={classes!("upload-area", self.is_dragging.then_some("drag-over"))}
                    ondragover={handle_drag_over}
                    ondragleave={handle_drag_leave}
                    ondrop={link.callback(Msg::HandleDrop)}
                    onclick={debounce(300, trigger_file_input)}
                >
                    {
                        if let Some(preview) = self.preview() {
                            html! {
                                <img class="preview-image" src={preview.src()} alt="미리보기" />
                            }
                        } else {
                            html! {
                                <div class="upload-placeholder">
                                    <i class="fa-solid fa-cloud-arrow-up"></i>
                                    <p>{"이미지를 끌어다 놓거나 클릭해서 선택하세요"}</p>
                                    <p class="file-types">{"지원 형식: JPG, PNG, WEBP, GIF"}</p>
                                </div>
                            }
                        }
                    }
                </div>
            </>
        }
    }
}

impl Component for Analyzer {
    type Message = Msg;
    type Properties = PageProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            controller: Controller::new(AnalyzerPage),
            form: AnalyzeForm::default(),
            file_preview: None,
            is_dragging: false,
            notice: None,
            file_input: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(file) => {
                log::info!("Reading {} ({} bytes)", file.name(), file.size());
                Self::load_file(ctx, file);
                false
            }
            Msg::FileLoaded(image, preview) => {
                self.form.file = Some(image);
                self.form.url.clear();
                self.file_preview = Some(preview);
                self.notice = None;
                true
            }
            Msg::FileFailed(message) => {
                self.notice = Some(message);
                true
            }
            Msg::UrlChanged(url) => {
                // Typing a URL drops any chosen file.
                if !url.trim().is_empty() {
                    self.form.file = None;
                    self.file_preview = None;
                }
                self.form.url = url;
                true
            }
            Msg::SetDragging(dragging) => {
                self.is_dragging = dragging;
                true
            }
            Msg::HandleDrop(event) => {
                event.prevent_default();
                self.is_dragging = false;
                let file = event
                    .data_transfer()
                    .and_then(|data| data.files())
                    .map(|files| extract_image_files(&files))
                    .and_then(|files| files.into_iter().next());
                match file {
                    Some(file) => ctx.link().send_message(Msg::FileChosen(file)),
                    None => self.notice = Some("이미지 파일만 업로드할 수 있습니다.".into()),
                }
                true
            }
            Msg::Submit => match self.controller.begin(&self.form) {
                Ok(request) => {
                    self.notice = None;
                    dispatch(ctx.link(), &ctx.props().transport, request, Msg::Completed);
                    true
                }
                Err(SubmitRejected::Busy) => false,
                Err(e) => {
                    log::warn!("Analysis not sent: {}", e);
                    true
                }
            },
            Msg::Completed(outcome) => {
                self.controller.complete(outcome);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let controls = self.controller.controls();

        html! {
            <div class="analyzer">
                <h2><i class="fa-solid fa-magnifying-glass"></i>{" 이미지 분석"}</h2>
                <div class="upload-section">
                    { self.render_drop_zone(ctx) }
                    <div class="url-input">
                        <label for="imageUrl">{"또는 이미지 URL"}</label>
                        <input
                            type="url"
                            id="imageUrl"
                            placeholder="https://example.com/image.jpg"
                            value={self.form.url.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::UrlChanged(input.value())
                            })}
                        />
                    </div>
                </div>
                { render_notice(self.notice.as_deref()) }
                <button
                    id="analyzeBtn"
                    class="analyze-btn"
                    disabled={controls.submit_disabled}
                    onclick={link.callback(|_| Msg::Submit)}
                >
                    <i class="fa-solid fa-microscope"></i>
                    { if controls.show_loading { " 분석 중..." } else { " 분석하기" } }
                </button>
                <div id="result" class={classes!("result-panel", self.controller.state().name())}>
                    { render_view(&self.controller.view()) }
                </div>
            </div>
        }
    }
}
