use std::cell::RefCell;
use std::rc::Rc;

use gloo::file::{Blob, ObjectUrl};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlImageElement, KeyboardEvent};
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

use crate::chat_panel::{viewport_height, ChatPanel};
use crate::components::{ImagePicker, StatusFooter};
use crate::config::{self, CONFIG_PATH};
use crate::input::KeyAction;
use crate::model::{self, TmImageModel};
use crate::session::Session;

type WebSession = Session<TmImageModel, ObjectUrl>;
type SharedSession = Rc<RefCell<WebSession>>;

/// Config first, then the model. Each stage reports into the session and
/// never fails the page.
async fn startup(session: SharedSession, trigger: UseForceUpdateHandle) {
    let config = config::load(CONFIG_PATH).await;
    session.borrow_mut().apply_config(config);
    trigger.force_update();

    let paths = session.borrow().model_paths();
    let model = match paths {
        Ok(paths) => model::load(&paths).await,
        Err(e) => Err(e),
    };
    session.borrow_mut().apply_model(model);
    trigger.force_update();
}

fn submit(session: &SharedSession, trigger: &UseForceUpdateHandle) {
    let pending = session.borrow_mut().begin_submit();
    let Some(pending) = pending else {
        return;
    };
    trigger.force_update();

    let session = session.clone();
    let trigger = trigger.clone();
    spawn_local(async move {
        let reply = pending.resolve().await;
        session.borrow_mut().finish_submit(reply);
        trigger.force_update();
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_mut_ref(WebSession::new);
    let trigger = use_force_update();

    {
        let session = session.clone();
        let trigger = trigger.clone();
        use_effect_with((), move |_| {
            spawn_local(startup(session, trigger));
            || ()
        });
    }

    let on_input = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |(value, scroll_height): (String, f64)| {
            {
                let mut session = session.borrow_mut();
                session.input_mut().edit(value);
                session.input_mut().resize(scroll_height, viewport_height());
            }
            trigger.force_update();
        })
    };

    let on_keydown = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |e: KeyboardEvent| {
            let action = session.borrow().input().key(&e.key(), e.shift_key());
            if action == KeyAction::Submit {
                e.prevent_default();
                submit(&session, &trigger);
            }
        })
    };

    let on_send = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |_: ()| submit(&session, &trigger))
    };

    let on_select = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |file: web_sys::File| {
            let name = file.name();
            let url = ObjectUrl::from(Blob::from(web_sys::Blob::from(file)));
            log::debug!("selected {name}");
            session.borrow_mut().select_image(url, name);
            trigger.force_update();
        })
    };

    let on_load = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |image: HtmlImageElement| {
            session.borrow_mut().image_loaded(image);
            trigger.force_update();
        })
    };

    let on_error = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |_: ()| {
            session.borrow_mut().image_failed();
            trigger.force_update();
        })
    };

    let (preview_url, preview_alt, loading, entries, input_value, input_style, busy, status, version, model_ready) = {
        let view = session.borrow();
        let upload = view.upload();
        (
            upload.preview_url().map(|url| AttrValue::from(url.to_string())),
            upload.preview_name().map(|name| AttrValue::from(name.to_string())),
            upload.is_pending(),
            view.transcript().entries().to_vec(),
            AttrValue::from(view.input().value().to_string()),
            AttrValue::from(view.input().height_style()),
            view.is_busy(),
            AttrValue::from(view.status_line().to_string()),
            view.version_label().map(|v| AttrValue::from(v.to_string())),
            view.model_ready(),
        )
    };

    html! {
        <div class="flex flex-col h-screen max-w-2xl mx-auto bg-white border-x border-gray-200">
            <div class="p-4 border-b border-gray-300">
                <h2 class="text-lg font-semibold">{"Pebble"}</h2>
            </div>

            <ImagePicker
                {preview_url}
                {preview_alt}
                {loading}
                {on_select}
                {on_load}
                {on_error}
            />

            <ChatPanel
                {entries}
                {input_value}
                {input_style}
                {busy}
                {on_input}
                {on_keydown}
                {on_send}
            />

            <StatusFooter
                {status}
                {version}
                {model_ready}
            />
        </div>
    }
}
