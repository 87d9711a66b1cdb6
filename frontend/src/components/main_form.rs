use super::spinner::Spinner;
use super::token_count::TokenCount;
use crate::api;
use crate::store::{Action, StoreHandle};
use shared::models::{MainDraft, Model};
use shared::state::Page;
use shared::validation::{self, Field};
use std::collections::HashSet;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MainFormProps {
    pub store: StoreHandle,
}

/// Callback that applies one field's new text to a copy of the draft.
fn draft_editor<E: 'static>(
    store: &StoreHandle,
    touched: &UseStateHandle<HashSet<Field>>,
    field: Option<Field>,
    read: fn(&E) -> String,
    apply: fn(&mut MainDraft, String),
) -> Callback<E> {
    let store = store.clone();
    let touched = touched.clone();
    Callback::from(move |e: E| {
        let mut draft = store.draft().clone();
        apply(&mut draft, read(&e));
        store.dispatch(Action::EditDraft(draft));
        if let Some(field) = field
            && !touched.contains(&field)
        {
            let mut next = (*touched).clone();
            next.insert(field);
            touched.set(next);
        }
    })
}

fn input_value(e: &InputEvent) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

fn textarea_value(e: &InputEvent) -> String {
    let textarea: HtmlTextAreaElement = e.target_unchecked_into();
    textarea.value()
}

fn select_value(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

#[function_component(MainForm)]
pub fn main_form(props: &MainFormProps) -> Html {
    let store = &props.store;
    let touched = use_state(HashSet::<Field>::new);

    let on_salutation = draft_editor(store, &touched, Some(Field::Salutation), input_value, |d, v| {
        d.salutation = v
    });
    let on_job_description = draft_editor(
        store,
        &touched,
        Some(Field::JobDescription),
        textarea_value,
        |d, v| d.job_description = v,
    );
    let on_notes = draft_editor(store, &touched, None, textarea_value, |d, v| {
        d.additional_notes = v
    });
    let on_model = draft_editor(store, &touched, None, select_value, |d, v| {
        if let Some(model) = Model::parse(&v) {
            d.model = model;
        }
    });

    // Numeric inputs keep their raw text so partial entries like "1." survive re-renders
    let temperature_text = use_state(|| {
        store.draft().temperature.map(|t| t.to_string()).unwrap_or_default()
    });
    let word_limit_text = use_state(|| {
        store.draft().word_limit.map(|w| w.to_string()).unwrap_or_default()
    });

    let on_temperature = {
        let temperature_text = temperature_text.clone();
        let edit = draft_editor(store, &touched, Some(Field::Temperature), input_value, |d, v| {
            d.temperature = v.trim().parse::<f64>().ok()
        });
        Callback::from(move |e: InputEvent| {
            temperature_text.set(input_value(&e));
            edit.emit(e);
        })
    };
    let on_word_limit = {
        let word_limit_text = word_limit_text.clone();
        let edit = draft_editor(store, &touched, Some(Field::WordLimit), input_value, |d, v| {
            d.word_limit = v.trim().parse::<u32>().ok()
        });
        Callback::from(move |e: InputEvent| {
            word_limit_text.set(input_value(&e));
            edit.emit(e);
        })
    };

    let open_settings = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::Navigate(Page::Settings)))
    };

    let open_result = {
        let store = store.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            store.dispatch(Action::Navigate(Page::Result));
        })
    };

    let on_submit = {
        let store = store.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !store.can_submit() {
                return;
            }
            let submission = match validation::build_submission(store.draft(), store.settings()) {
                Ok(submission) => submission,
                Err(errors) => {
                    tracing::warn!("Submission blocked: {:?}", errors);
                    return;
                }
            };

            store.dispatch(Action::BeginRequest);

            let store = store.clone();
            yew::platform::spawn_local(async move {
                let outcome = api::fetch_cover_letter(&submission).await;
                store.dispatch(Action::FinishRequest(outcome));
            });
        })
    };

    let draft = store.draft();
    let errors = store.draft_errors().unwrap_or_default();
    let error_for = |field: Field| -> Html {
        match errors.shown(field, &touched) {
            Some(message) => html! { <span class="field-error">{message}</span> },
            None => html! {},
        }
    };

    html! {
        <div class="page">
            <button
                class={classes!("icon-btn", "page-corner", (!store.is_settings_valid()).then_some("invalid"))}
                onclick={open_settings}
                title="Settings"
            >
                <svg viewBox="0 0 24 24"><path d="M19.14 12.94c.04-.3.06-.61.06-.94 0-.32-.02-.64-.07-.94l2.03-1.58c.18-.14.23-.41.12-.61l-1.92-3.32c-.12-.22-.37-.29-.59-.22l-2.39.96c-.5-.38-1.03-.7-1.62-.94l-.36-2.54c-.04-.24-.24-.41-.48-.41h-3.84c-.24 0-.43.17-.47.41l-.36 2.54c-.59.24-1.13.57-1.62.94l-2.39-.96c-.22-.08-.47 0-.59.22L3.16 8.87c-.12.21-.08.47.12.61l2.03 1.58c-.05.3-.09.63-.09.94s.02.64.07.94l-2.03 1.58c-.18.14-.23.41-.12.61l1.92 3.32c.12.22.37.29.59.22l2.39-.96c.5.38 1.03.7 1.62.94l.36 2.54c.05.24.24.41.48.41h3.84c.24 0 .44-.17.47-.41l.36-2.54c.59-.24 1.13-.56 1.62-.94l2.39.96c.22.08.47 0 .59-.22l1.92-3.32c.12-.22.07-.47-.12-.61l-2.01-1.58zM12 15.6c-1.98 0-3.6-1.62-3.6-3.6s1.62-3.6 3.6-3.6 3.6 1.62 3.6 3.6-1.62 3.6-3.6 3.6z"></path></svg>
            </button>
            <h1 class="page-title">{"Generate Cover Letter"}</h1>

            <form class="page-body" onsubmit={on_submit}>
                <div class="form-group">
                    <label class="form-label">{"Salutation"}{error_for(Field::Salutation)}</label>
                    <input class="form-input" type="text" name="salutation"
                        placeholder="Dear Hiring Manager,"
                        value={draft.salutation.clone()}
                        oninput={on_salutation}
                    />
                </div>

                <div class="form-group">
                    <label class="form-label">{"Job Description"}{error_for(Field::JobDescription)}</label>
                    <textarea class="form-textarea" name="jobDescription" rows="10"
                        placeholder="Paste job description here"
                        value={draft.job_description.clone()}
                        oninput={on_job_description}
                    />
                </div>

                <div class="form-group">
                    <label class="form-label">{"Additional Notes (Optional)"}</label>
                    <textarea class="form-textarea" name="additionalNotes"
                        value={draft.additional_notes.clone()}
                        oninput={on_notes}
                    />
                </div>

                <div class="form-grid-3">
                    <div class="form-group">
                        <label class="form-label">{"Model"}</label>
                        <select class="form-select" name="model" onchange={on_model}>
                            { for Model::ALL.iter().map(|model| html! {
                                <option value={model.as_str()} selected={*model == draft.model}>
                                    {model.as_str()}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label class="form-label">{"Temperature"}{error_for(Field::Temperature)}</label>
                        <input class="form-input" type="number" name="temperature"
                            step="0.1" min="0" max="2" placeholder="0.7"
                            value={(*temperature_text).clone()}
                            oninput={on_temperature}
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label">{"Word Limit"}{error_for(Field::WordLimit)}</label>
                        <input class="form-input" type="number" name="wordLimit"
                            step="100" min="100" placeholder="300"
                            value={(*word_limit_text).clone()}
                            oninput={on_word_limit}
                        />
                    </div>
                </div>

                <div class="form-actions">
                    <button class="btn btn-primary btn-grow" type="submit" disabled={!store.can_submit()}>
                        {"Generate"}
                    </button>
                    if store.result().is_some() {
                        <button class="btn btn-secondary" type="button" onclick={open_result} title="Show last cover letter">
                            {"↪"}
                        </button>
                    }
                </div>

                <TokenCount>
                    {format!("Estimated token count in prompt: {}", store.estimated_tokens())}
                </TokenCount>
            </form>

            if let Some(error) = store.error() {
                <div class="page-error">{error}</div>
            }
            if store.is_loading() {
                <div class="loading"><Spinner /></div>
            }
        </div>
    }
}
