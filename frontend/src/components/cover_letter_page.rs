use super::copiable_textarea::CopiableTextarea;
use super::token_count::TokenCount;
use crate::store::{Action, StoreHandle};
use shared::models::CompletionResult;
use shared::state::Page;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CoverLetterPageProps {
    pub store: StoreHandle,
}

#[function_component(CoverLetterPage)]
pub fn cover_letter_page(props: &CoverLetterPageProps) -> Html {
    let store = &props.store;
    let result = store.result().cloned().unwrap_or_default();

    // Edits stay local to the page and are dropped when a new letter arrives
    let text = use_state(|| result.text.clone());
    {
        let text = text.clone();
        use_effect_with(result.text.clone(), move |fresh| {
            text.set(fresh.clone());
            || ()
        });
    }

    let on_input = {
        let text = text.clone();
        Callback::from(move |value: String| text.set(value))
    };

    let on_back = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::Navigate(Page::Main)))
    };

    let CompletionResult { usage, .. } = result;

    html! {
        <div class="page">
            <button class="icon-btn page-corner" onclick={on_back} title="Back">
                <svg viewBox="0 0 24 24"><path d="M9 14 4 9l5-5v3h7a5 5 0 0 1 0 10h-3v-2h3a3 3 0 0 0 0-6H9v5z"></path></svg>
            </button>
            <h1 class="page-title">{"Cover Letter"}</h1>
            <div class="page-body">
                <CopiableTextarea value={(*text).clone()} oninput={on_input} />
                <TokenCount>
                    {format!(
                        "Tokens Used: {} (Prompt: {}/Completion: {})",
                        usage.total, usage.prompt, usage.completion
                    )}
                </TokenCount>
            </div>
        </div>
    }
}
