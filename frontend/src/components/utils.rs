use gloo_events::{EventListener, EventListenerOptions};
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use js_sys::Date;
use shared::View;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{BeforeUnloadEvent, FileList};
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

pub fn extract_image_files(file_list: &FileList) -> Vec<GlooFile> {
    (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .filter(|file| file.type_().starts_with("image/"))
        .map(GlooFile::from)
        .collect()
}

/// Local wall-clock time as `HH:MM:SS`.
pub fn current_time() -> String {
    let now = Date::new_0();
    format!("{:02}:{:02}:{:02}", now.get_hours(), now.get_minutes(), now.get_seconds())
}

/// Mounts a page view. The markup comes from `View`'s renderer, which escapes
/// every text node and attribute value.
pub fn render_view(view: &View) -> Html {
    if *view == View::Empty {
        return html! {};
    }
    Html::from_html_unchecked(AttrValue::from(view.to_string()))
}

pub fn render_notice(notice: Option<&str>) -> Html {
    if let Some(message) = notice {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message }</p>
            </div>
        }
    } else {
        html! {}
    }
}

/// Keeps a `beforeunload` prompt installed exactly while `busy`.
pub fn sync_unload_guard(guard: &mut Option<EventListener>, busy: bool) {
    if !busy {
        *guard = None;
        return;
    }
    if guard.is_some() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = EventListenerOptions::enable_prevent_default();
    *guard = Some(EventListener::new_with_options(&window, "beforeunload", options, |event| {
        event.prevent_default();
        if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
            event.set_return_value("요청을 처리하는 중입니다. 페이지를 떠나시겠습니까?");
        }
    }));
}
