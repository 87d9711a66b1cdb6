use gloo_storage::{LocalStorage, Storage};
use shared::models::{CompletionError, CompletionResult, MainDraft, Settings};
use shared::state::{AppState, Page};
use shared::storage::{KeyValueStore, StorageError, StorageResult};
use std::ops::Deref;
use std::rc::Rc;
use yew::prelude::*;

/// `window.localStorage` behind the shared persistence adapter.
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set_raw(&self, key: &str, value: String) -> StorageResult<()> {
        LocalStorage::raw()
            .set_item(key, &value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Store(AppState);

impl Default for Store {
    fn default() -> Self {
        Self(AppState::load(&BrowserStore))
    }
}

impl Deref for Store {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.0
    }
}

pub enum Action {
    EditDraft(MainDraft),
    SaveSettings(Settings),
    BeginRequest,
    FinishRequest(Result<CompletionResult, CompletionError>),
    Navigate(Page),
    Settle(u64),
}

impl Reducible for Store {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let state = &mut next.0;

        match action {
            Action::EditDraft(draft) => {
                state.set_draft(draft);
            }
            Action::SaveSettings(settings) => {
                if let Err(errors) = state.save_settings(&BrowserStore, settings) {
                    tracing::warn!("Settings not saved: {:?}", errors);
                }
            }
            Action::BeginRequest => {
                if let Err(errors) = state.begin_request(&BrowserStore) {
                    tracing::warn!("Generate pressed with invalid form: {:?}", errors);
                }
            }
            Action::FinishRequest(outcome) => {
                state.finish_request(outcome);
            }
            Action::Navigate(page) => {
                let transition = state.navigate(page);
                tracing::debug!("Navigate to {:?}: {:?}", page, transition);
            }
            Action::Settle(ticket) => {
                state.settle(ticket);
            }
        }

        next.into()
    }
}

pub type StoreHandle = UseReducerHandle<Store>;
