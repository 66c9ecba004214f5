use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusFooterProps {
    /// Project line built from the config, or the failure string
    pub status: AttrValue,
    #[prop_or_default]
    pub version: Option<AttrValue>,
    #[prop_or_default]
    pub model_ready: bool,
}

#[function_component(StatusFooter)]
pub fn status_footer(props: &StatusFooterProps) -> Html {
    html! {
        <footer class="flex items-center justify-between px-4 py-2 border-t border-gray-300 text-xs text-gray-500">
            <span id="footer-info">{props.status.clone()}</span>
            <span class="flex items-center gap-2">
                if let Some(version) = props.version.clone() {
                    <span id="versionText">{version}</span>
                }
                <span
                    class={classes!(
                        "w-2",
                        "h-2",
                        "rounded-full",
                        if props.model_ready { "bg-green-500" } else { "bg-gray-300" }
                    )}
                    title={if props.model_ready { "Model ready" } else { "Model not loaded" }}
                />
            </span>
        </footer>
    }
}
