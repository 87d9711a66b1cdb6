use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

const COPIED_RESET_MS: u32 = 2000;

#[derive(Properties, PartialEq)]
pub struct CopiableTextareaProps {
    pub value: String,
    pub oninput: Callback<String>,
}

/// Textarea with a copy-to-clipboard button shown on hover.
#[function_component(CopiableTextarea)]
pub fn copiable_textarea(props: &CopiableTextareaProps) -> Html {
    let copied = use_state(|| false);
    let is_hovered = use_state(|| false);
    let reset = use_mut_ref(|| None::<Timeout>);

    let on_mouse_enter = {
        let is_hovered = is_hovered.clone();
        Callback::from(move |_: MouseEvent| is_hovered.set(true))
    };

    let on_mouse_leave = {
        let is_hovered = is_hovered.clone();
        Callback::from(move |_: MouseEvent| is_hovered.set(false))
    };

    let on_input = {
        let oninput = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            oninput.emit(textarea.value());
        })
    };

    let on_copy = {
        let content = props.value.clone();
        let copied = copied.clone();
        let reset = reset.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let content = content.clone();
            let copied = copied.clone();
            let reset = reset.clone();
            yew::platform::spawn_local(async move {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let promise = window.navigator().clipboard().write_text(&content);
                if let Err(e) = JsFuture::from(promise).await {
                    tracing::error!("Failed to copy text: {:?}", e);
                    return;
                }
                copied.set(true);
                // Replacing the handle cancels a reset still in flight
                *reset.borrow_mut() = Some(Timeout::new(COPIED_RESET_MS, move || copied.set(false)));
            });
        })
    };

    html! {
        <div class="copiable" onmouseenter={on_mouse_enter} onmouseleave={on_mouse_leave}>
            <textarea
                class="form-textarea letter-text"
                value={props.value.clone()}
                oninput={on_input}
            />
            if *is_hovered && !props.value.is_empty() {
                <button class="copy-btn" onclick={on_copy} title="Copy">
                    if *copied {
                        {"✓"}
                    } else {
                        <svg viewBox="0 0 24 24" width="16" height="16" fill="currentColor">
                            <path d="M16 1H4c-1.1 0-2 .9-2 2v14h2V3h12V1zm3 4H8c-1.1 0-2 .9-2 2v14c0 1.1.9 2 2 2h11c1.1 0 2-.9 2-2V7c0-1.1-.9-2-2-2zm0 16H8V7h11v14z"/>
                        </svg>
                    }
                </button>
            }
        </div>
    }
}
