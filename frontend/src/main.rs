mod api;
mod components;
mod store;

use components::cover_letter_page::CoverLetterPage;
use components::main_form::MainForm;
use components::settings_form::SettingsForm;
use gloo_timers::callback::Timeout;
use shared::state::{Page, RETURN_DELAY, Slide};
use store::{Action, Store};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(Store::default);

    // Finish a deferred page switch once the slide has played out
    {
        let store = store.clone();
        let pending = store.navigator().pending();
        use_effect_with(pending, move |pending| {
            let timeout = pending.map(|ticket| {
                Timeout::new(RETURN_DELAY.as_millis() as u32, move || {
                    store.dispatch(Action::Settle(ticket))
                })
            });
            move || drop(timeout)
        });
    }

    let offset = match store.navigator().slide() {
        Slide::Left => "0",
        Slide::Right => "-100%",
    };

    html! {
        <div class="viewport">
            <div class="track" style={format!("transform: translateX({});", offset)}>
                <MainForm store={store.clone()} />

                if store.navigator().secondary() == Page::Result {
                    <CoverLetterPage store={store.clone()} />
                } else {
                    <SettingsForm store={store.clone()} />
                }
            </div>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
