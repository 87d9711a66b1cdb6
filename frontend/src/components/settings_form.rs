use crate::store::{Action, StoreHandle};
use shared::models::Settings;
use shared::state::Page;
use shared::validation::{Field, validate_settings};
use std::collections::HashSet;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SettingsFormProps {
    pub store: StoreHandle,
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn touch(touched: &UseStateHandle<HashSet<Field>>, field: Field) {
    if !touched.contains(&field) {
        let mut next = (**touched).clone();
        next.insert(field);
        touched.set(next);
    }
}

#[function_component(SettingsForm)]
pub fn settings_form(props: &SettingsFormProps) -> Html {
    let store = &props.store;

    // Local copy so unsaved edits never reach the shared state
    let local_state = use_state(|| store.settings().clone());
    // Errors stay hidden until the field has been edited
    let touched = use_state(HashSet::<Field>::new);

    let on_api_key_input = {
        let local_state = local_state.clone();
        let touched = touched.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            s.api_key = input.value();
            touch(&touched, Field::ApiKey);
            local_state.set(s);
        })
    };

    let on_name_input = {
        let local_state = local_state.clone();
        let touched = touched.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            s.name = input.value();
            touch(&touched, Field::Name);
            local_state.set(s);
        })
    };

    let on_work_experience_input = {
        let local_state = local_state.clone();
        let touched = touched.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            s.work_experience = textarea.value();
            touch(&touched, Field::WorkExperience);
            local_state.set(s);
        })
    };

    let on_portfolio_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            s.portfolio_site = optional(input.value());
            local_state.set(s);
        })
    };

    let on_skill_set_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            s.skill_set = optional(textarea.value());
            local_state.set(s);
        })
    };

    let on_additional_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            s.additional_settings = optional(textarea.value());
            local_state.set(s);
        })
    };

    let on_submit = {
        let store = store.clone();
        let local_state = local_state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            store.dispatch(Action::SaveSettings((*local_state).clone()));
        })
    };

    let on_close = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::Navigate(Page::Main)))
    };

    let errors = validate_settings(&local_state).err().unwrap_or_default();
    let label_error = |field: Field| -> String {
        errors
            .shown(field, &touched)
            .map(|message| format!(". {}", message))
            .unwrap_or_default()
    };
    let Settings {
        api_key,
        name,
        work_experience,
        portfolio_site,
        skill_set,
        additional_settings,
    } = (*local_state).clone();

    html! {
        <div class="page page-settings">
            <button class="icon-btn page-corner" onclick={on_close} title="Close">
                <svg viewBox="0 0 24 24"><path d="M19 6.41 17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12z"></path></svg>
            </button>
            <h1 class="page-title">{"Settings"}</h1>

            <form class="page-body" onsubmit={on_submit}>
                <div class="form-group">
                    <label class="form-label">{"OpenAI API Key"}{label_error(Field::ApiKey)}</label>
                    <input type="password" class="form-input" name="apiKey"
                        placeholder="Enter your API key"
                        value={api_key}
                        oninput={on_api_key_input}
                    />
                    <div class="form-hint">
                        {"Stored unencrypted in this browser and sent directly to the provider."}
                    </div>
                </div>

                <div class="form-group">
                    <label class="form-label">{"Name"}{label_error(Field::Name)}</label>
                    <input type="text" class="form-input" name="name"
                        placeholder="e.g. John Smith"
                        value={name}
                        oninput={on_name_input}
                    />
                </div>

                <div class="form-group">
                    <label class="form-label">{"Work Experience"}{label_error(Field::WorkExperience)}</label>
                    <textarea class="form-textarea" name="workExperience" rows="10"
                        value={work_experience}
                        oninput={on_work_experience_input}
                    />
                </div>

                <div class="form-group">
                    <label class="form-label">{"Portfolio Site (Optional)"}</label>
                    <input type="text" class="form-input" name="portfolioSite"
                        placeholder="Enter a url"
                        value={portfolio_site.unwrap_or_default()}
                        oninput={on_portfolio_input}
                    />
                </div>

                <div class="form-group">
                    <label class="form-label">{"Skill Set (Optional)"}</label>
                    <textarea class="form-textarea" name="skillSet" rows="5"
                        value={skill_set.unwrap_or_default()}
                        oninput={on_skill_set_input}
                    />
                </div>

                <div class="form-group">
                    <label class="form-label">{"Additional Settings (Optional)"}</label>
                    <textarea class="form-textarea" name="additionalSettings"
                        placeholder="e.g. Use British English"
                        value={additional_settings.unwrap_or_default()}
                        oninput={on_additional_input}
                    />
                </div>

                <button class="btn btn-primary" type="submit" disabled={!errors.is_empty()}>
                    {"Save"}
                </button>
            </form>
        </div>
    }
}
