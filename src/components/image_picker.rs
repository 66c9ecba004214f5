use web_sys::{HtmlImageElement, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ImagePickerProps {
    /// Temporary URL of the pending or staged image
    #[prop_or_default]
    pub preview_url: Option<AttrValue>,
    #[prop_or_default]
    pub preview_alt: Option<AttrValue>,
    /// The preview has not reported `load` or `error` yet
    #[prop_or_default]
    pub loading: bool,
    pub on_select: Callback<web_sys::File>,
    pub on_load: Callback<HtmlImageElement>,
    pub on_error: Callback<()>,
}

/// File picker plus the preview element the classifier reads from.
#[function_component(ImagePicker)]
pub fn image_picker(props: &ImagePickerProps) -> Html {
    let onchange = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_select.emit(file);
            }
            // Allow picking the same file again
            input.set_value("");
        })
    };

    let onload = {
        let on_load = props.on_load.clone();
        Callback::from(move |e: Event| {
            if let Some(image) = e.target_dyn_into::<HtmlImageElement>() {
                on_load.emit(image);
            }
        })
    };

    let onerror = {
        let on_error = props.on_error.clone();
        Callback::from(move |_: Event| on_error.emit(()))
    };

    html! {
        <div class="flex items-center gap-3 p-4 border-b border-gray-300">
            <label class="px-3 py-1.5 bg-white border border-gray-300 rounded-lg text-sm cursor-pointer hover:bg-gray-100">
                {"Upload image"}
                <input
                    id="imageUpload"
                    type="file"
                    accept="image/*"
                    class="hidden"
                    {onchange}
                />
            </label>
            if let Some(src) = props.preview_url.clone() {
                <img
                    id="input-image"
                    {src}
                    alt={props.preview_alt.clone().unwrap_or_default()}
                    class="h-16 w-16 object-cover rounded border border-gray-200"
                    {onload}
                    {onerror}
                />
                if props.loading {
                    <span class="text-xs text-gray-400">{"Loading image..."}</span>
                }
            } else {
                <span class="text-xs text-gray-400">{"No image selected"}</span>
            }
        </div>
    }
}
