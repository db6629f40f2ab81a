use super::PageProps;
use super::utils::{debounce, render_view};
use crate::api::dispatch;
use shared::{Controller, HttpResponse, PredictorPage, SubmitRejected, TransportError};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

const CANVAS_SIZE: u32 = 280;
const STROKE_WIDTH: f64 = 18.0;

pub enum Msg {
    StartStroke(f64, f64),
    Stroke(f64, f64),
    EndStroke,
    Clear,
    Predict,
    Completed(Result<HttpResponse, TransportError>),
}

pub struct Predictor {
    controller: Controller<PredictorPage>,
    canvas: NodeRef,
    drawing: bool,
    last: (f64, f64),
}

impl Predictor {
    fn canvas(&self) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas = self.canvas.cast::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some((canvas, context))
    }

    fn clear_canvas(&self) {
        if let Some((canvas, context)) = self.canvas() {
            context.set_fill_style_str("white");
            context.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        }
    }

    fn draw_line(&self, from: (f64, f64), to: (f64, f64)) {
        if let Some((_, context)) = self.canvas() {
            context.set_stroke_style_str("black");
            context.set_line_width(STROKE_WIDTH);
            context.set_line_cap("round");
            context.begin_path();
            context.move_to(from.0, from.1);
            context.line_to(to.0, to.1);
            context.stroke();
        }
    }

    fn snapshot(&self) -> String {
        self.canvas()
            .and_then(|(canvas, _)| match canvas.to_data_url_with_type("image/png") {
                Ok(data_url) => Some(data_url),
                Err(e) => {
                    log::error!("Failed to export canvas: {:?}", e);
                    None
                }
            })
            .unwrap_or_default()
    }
}

impl Component for Predictor {
    type Message = Msg;
    type Properties = PageProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            controller: Controller::new(PredictorPage),
            canvas: NodeRef::default(),
            drawing: false,
            last: (0.0, 0.0),
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.clear_canvas();
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StartStroke(x, y) => {
                self.drawing = true;
                self.last = (x, y);
                false
            }
            Msg::Stroke(x, y) => {
                if self.drawing {
                    self.draw_line(self.last, (x, y));
                    self.last = (x, y);
                }
                false
            }
            Msg::EndStroke => {
                self.drawing = false;
                false
            }
            Msg::Clear => {
                self.clear_canvas();
                false
            }
            Msg::Predict => {
                let data_url = self.snapshot();
                match self.controller.begin(&data_url) {
                    Ok(request) => {
                        dispatch(ctx.link(), &ctx.props().transport, request, Msg::Completed);
                        true
                    }
                    Err(SubmitRejected::Busy) => false,
                    Err(e) => {
                        log::warn!("Prediction not sent: {}", e);
                        true
                    }
                }
            }
            Msg::Completed(outcome) => {
                self.controller.complete(outcome);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let controls = self.controller.controls();
        let offset = |e: &MouseEvent| (e.offset_x() as f64, e.offset_y() as f64);

        html! {
            <div class="predictor">
                <h2><i class="fa-solid fa-pen"></i>{" 숫자를 그려보세요"}</h2>
                <canvas
                    id="canvas"
                    ref={self.canvas.clone()}
                    width={CANVAS_SIZE.to_string()}
                    height={CANVAS_SIZE.to_string()}
                    onmousedown={link.callback(move |e: MouseEvent| {
                        let (x, y) = offset(&e);
                        Msg::StartStroke(x, y)
                    })}
                    onmousemove={link.callback(move |e: MouseEvent| {
                        let (x, y) = offset(&e);
                        Msg::Stroke(x, y)
                    })}
                    onmouseup={link.callback(|_| Msg::EndStroke)}
                    onmouseleave={link.callback(|_| Msg::EndStroke)}
                />
                <div class="button-container">
                    <button
                        id="clearBtn"
                        class="analyze-btn"
                        style="background-color: var(--clear-color);"
                        onclick={link.callback(|_| Msg::Clear)}
                    >
                        <i class="fa-solid fa-eraser"></i>{" 지우기"}
                    </button>
                    <button
                        id="predictBtn"
                        class="analyze-btn"
                        disabled={controls.submit_disabled}
                        onclick={debounce(300, {
                            let link = link.clone();
                            move || link.send_message(Msg::Predict)
                        })}
                    >
                        <i class="fa-solid fa-wand-magic"></i>{" 예측하기"}
                    </button>
                </div>
                <div id="result" class={classes!("result-panel", self.controller.state().name())}>
                    { render_view(&self.controller.view()) }
                </div>
            </div>
        }
    }
}
