use yew::prelude::*;
use web_sys::{Element, HtmlTextAreaElement, KeyboardEvent};
use crate::input::capped_height;
use crate::types::{ChatEntry, Content, Role};

#[derive(Properties, PartialEq)]
pub struct ChatPanelProps {
    pub entries: Vec<ChatEntry>,
    pub input_value: AttrValue,
    pub input_style: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    /// New text plus the content height measured at `height: auto`.
    pub on_input: Callback<(String, f64)>,
    pub on_keydown: Callback<KeyboardEvent>,
    pub on_send: Callback<()>,
}

pub fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

#[function_component(ChatPanel)]
pub fn chat_panel(props: &ChatPanelProps) -> Html {
    let list_ref = use_node_ref();

    // Keep the newest entry in view
    {
        let list_ref = list_ref.clone();
        use_effect_with(props.entries.len(), move |_| {
            if let Some(list) = list_ref.cast::<Element>() {
                list.set_scroll_top(list.scroll_height());
            }
            || ()
        });
    }

    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(textarea) = e.target_dyn_into::<HtmlTextAreaElement>() {
                let style = textarea.style();
                let _ = style.set_property("height", "auto");
                let scroll_height = textarea.scroll_height() as f64;
                let height = capped_height(scroll_height, viewport_height());
                let _ = style.set_property("height", &format!("{height}px"));
                on_input.emit((textarea.value(), scroll_height));
            }
        })
    };

    let on_keydown = props.on_keydown.clone();

    let on_submit = {
        let on_send = props.on_send.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_send.emit(());
        })
    };

    html! {
        <div class="flex flex-col flex-1 min-h-0">
            <div ref={list_ref} id="chatArea" class="flex-1 overflow-y-auto p-4 space-y-3">
                {
                    props.entries.iter().map(|entry| {
                        html! {
                            <div
                                class={classes!(
                                    entry.role.css_class(),
                                    "p-3",
                                    "rounded-lg",
                                    if entry.role == Role::User { "bg-blue-100 ml-4" } else { "bg-gray-100 mr-4" }
                                )}
                            >
                                <div class="text-xs font-semibold text-gray-600 mb-1">
                                    {entry.role.label()}
                                </div>
                                {
                                    match &entry.content {
                                        Content::Text(text) => html! {
                                            <div class="text-sm whitespace-pre-wrap">{text}</div>
                                        },
                                        Content::Image { src, alt } => html! {
                                            <img src={src.clone()} alt={alt.clone()} class="max-w-xs rounded" />
                                        },
                                    }
                                }
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>

            <form onsubmit={on_submit} class="p-4 border-t border-gray-300">
                <textarea
                    id="userInput"
                    value={props.input_value.clone()}
                    style={props.input_style.clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    placeholder="Type a message... (Shift+Enter for new line)"
                    class="w-full px-3 py-2 border border-gray-300 rounded-lg text-sm resize-none focus:outline-none focus:ring-2 focus:ring-blue-500"
                    rows="1"
                />
                <button
                    id="sendBtn"
                    type="submit"
                    disabled={props.busy}
                    class="mt-2 w-full px-4 py-2 bg-blue-500 text-white rounded-lg text-sm font-medium hover:bg-blue-600 transition-colors disabled:opacity-50"
                >
                    {"Send"}
                </button>
            </form>
        </div>
    }
}
