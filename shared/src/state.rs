use crate::models::{
    CompletionError, CompletionResult, DraftPayload, MainDraft, Settings, Submission,
};
use crate::storage::{self, KeyValueStore};
use crate::tokens;
use crate::validation::{self, ValidationErrors};
use std::time::Duration;

/// Time the slide animation needs before the result view may unmount.
pub const RETURN_DELAY: Duration = Duration::from_millis(550);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Main,
    Settings,
    Result,
}

/// Horizontal position of the two-panel track. `Left` shows the main form,
/// `Right` shows the secondary panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Slide {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Immediate,
    /// The page switch must be applied with [`Navigator::settle`] once
    /// `after` has elapsed.
    Deferred { after: Duration, ticket: u64 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Navigator {
    page: Page,
    slide: Slide,
    pending: Option<(Page, u64)>,
    next_ticket: u64,
}

impl Navigator {
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn slide(&self) -> Slide {
        self.slide
    }

    /// Which view occupies the right-hand panel.
    pub fn secondary(&self) -> Page {
        if self.page == Page::Result {
            Page::Result
        } else {
            Page::Settings
        }
    }

    /// Ticket of a deferred page switch still waiting to be settled.
    pub fn pending(&self) -> Option<u64> {
        self.pending.map(|(_, ticket)| ticket)
    }

    pub fn navigate(&mut self, to: Page) -> Transition {
        self.pending = None;
        match (self.page, to) {
            (Page::Result, Page::Main) => {
                self.slide = Slide::Left;
                self.next_ticket += 1;
                let ticket = self.next_ticket;
                self.pending = Some((Page::Main, ticket));
                Transition::Deferred {
                    after: RETURN_DELAY,
                    ticket,
                }
            }
            (_, Page::Main) => {
                self.slide = Slide::Left;
                self.page = Page::Main;
                Transition::Immediate
            }
            (_, page) => {
                self.slide = Slide::Right;
                self.page = page;
                Transition::Immediate
            }
        }
    }

    /// Applies a deferred switch. Stale tickets are ignored.
    pub fn settle(&mut self, ticket: u64) {
        if let Some((page, pending)) = self.pending
            && pending == ticket
        {
            self.page = page;
            self.pending = None;
        }
    }
}

/// Everything the three views share: the main draft, the saved settings, the
/// request status and the last result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    draft: MainDraft,
    settings: Settings,
    settings_validated: bool,
    navigator: Navigator,
    is_loading: bool,
    error: Option<String>,
    result: Option<CompletionResult>,
}

impl AppState {
    /// Fresh state merged with whatever the store remembers.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut state = Self::default();
        if let Some(settings) = storage::load_settings(store) {
            state.settings_validated = validation::validate_settings(&settings).is_ok();
            state.settings = settings;
        }
        if let Some(params) = storage::load_params(store) {
            state.draft.apply_params(&params);
        }
        state
    }

    pub fn draft(&self) -> &MainDraft {
        &self.draft
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_settings_valid(&self) -> bool {
        self.settings_validated
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn page(&self) -> Page {
        self.navigator.page()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&CompletionResult> {
        self.result.as_ref()
    }

    pub fn draft_errors(&self) -> Option<ValidationErrors> {
        validation::validate_draft(&self.draft).err()
    }

    /// Whether the Generate action is enabled.
    pub fn can_submit(&self) -> bool {
        self.settings_validated && validation::build_submission(&self.draft, &self.settings).is_ok()
    }

    pub fn estimated_tokens(&self) -> u32 {
        tokens::estimate_tokens(&DraftPayload {
            draft: &self.draft,
            settings: &self.settings,
        })
    }

    pub fn set_draft(&mut self, draft: MainDraft) {
        self.draft = draft;
    }

    pub fn update_draft(&mut self, edit: impl FnOnce(&mut MainDraft)) {
        edit(&mut self.draft);
    }

    /// Validates, persists and applies new settings, then returns to the main
    /// view. A storage failure is logged and does not undo the in-memory
    /// update.
    pub fn save_settings(
        &mut self,
        store: &dyn KeyValueStore,
        settings: Settings,
    ) -> Result<(), ValidationErrors> {
        validation::validate_settings(&settings)?;
        if let Err(e) = storage::save_settings(store, &settings) {
            tracing::error!("Failed to persist settings: {}", e);
        }
        self.settings = settings;
        self.settings_validated = true;
        self.navigator.navigate(Page::Main);
        Ok(())
    }

    /// Starts a generate action: builds the submission, remembers the model
    /// parameters, clears the previous result and error, and raises the
    /// loading flag.
    pub fn begin_request(
        &mut self,
        store: &dyn KeyValueStore,
    ) -> Result<Submission, ValidationErrors> {
        let submission = validation::build_submission(&self.draft, &self.settings)?;
        if let Some(params) = self.draft.params()
            && let Err(e) = storage::save_params(store, &params)
        {
            tracing::warn!("Failed to persist generation parameters: {}", e);
        }
        self.result = None;
        self.error = None;
        self.is_loading = true;
        Ok(submission)
    }

    /// Ends the in-flight request on every path. Success shows the result
    /// view, failure leaves the user on the main form with a message.
    pub fn finish_request(&mut self, outcome: Result<CompletionResult, CompletionError>) {
        self.is_loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.navigator.navigate(Page::Result);
            }
            Err(e) => {
                tracing::error!("Cover letter request failed: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn navigate(&mut self, to: Page) -> Transition {
        // The result view has nothing to show until a request succeeds.
        if to == Page::Result && self.result.is_none() {
            return Transition::Immediate;
        }
        self.navigator.navigate(to)
    }

    pub fn settle(&mut self, ticket: u64) {
        self.navigator.settle(ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Model, decode_response};
    use crate::storage::{MAIN_SETTINGS_KEY, MemoryStore, SETTINGS_KEY};

    const MOCK_BODY: &str = r#"{"choices":[{"message":{"role":"assistant","content":"Dear Mock,\n\nThank you."}}],"usage":{"total_tokens":30,"prompt_tokens":20,"completion_tokens":10}}"#;

    fn profile() -> Settings {
        Settings {
            api_key: "abc123".into(),
            name: "John Doe".into(),
            work_experience: "Lorem ipsum dolor sit amet.".into(),
            ..Default::default()
        }
    }

    fn ready_state(store: &MemoryStore) -> AppState {
        let mut state = AppState::load(store);
        state.save_settings(store, profile()).unwrap();
        state.update_draft(|d| {
            d.job_description = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.".into()
        });
        state
    }

    #[test]
    fn starts_on_main_without_valid_settings() {
        let state = AppState::load(&MemoryStore::default());
        assert_eq!(state.page(), Page::Main);
        assert_eq!(state.navigator().slide(), Slide::Left);
        assert!(!state.is_settings_valid());
        assert!(!state.can_submit());
    }

    #[test]
    fn submit_disabled_until_everything_is_filled() {
        let store = MemoryStore::default();
        let mut state = ready_state(&store);
        assert!(state.can_submit());

        state.update_draft(|d| d.salutation.clear());
        assert!(!state.can_submit());
        state.update_draft(|d| d.salutation = "Hi,".into());

        state.update_draft(|d| d.temperature = Some(2.5));
        assert!(!state.can_submit());
        state.update_draft(|d| d.temperature = Some(2.0));

        state.update_draft(|d| d.word_limit = Some(50));
        assert!(!state.can_submit());
        state.update_draft(|d| d.word_limit = Some(100));
        assert!(state.can_submit());
    }

    #[test]
    fn invalid_settings_are_rejected_and_not_stored() {
        let store = MemoryStore::default();
        let mut state = AppState::load(&store);
        let mut settings = profile();
        settings.name.clear();
        assert!(state.save_settings(&store, settings).is_err());
        assert!(!state.is_settings_valid());
        assert!(store.get_raw(SETTINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn successful_response_shows_result() {
        let store = MemoryStore::default();
        let mut state = ready_state(&store);

        let submission = state.begin_request(&store).unwrap();
        assert_eq!(submission.settings.name, "John Doe");
        assert!(state.is_loading());
        assert!(state.result().is_none());

        state.finish_request(decode_response(200, MOCK_BODY));
        assert!(!state.is_loading());
        assert_eq!(state.page(), Page::Result);
        assert_eq!(state.navigator().slide(), Slide::Right);
        assert!(state.result().unwrap().text.contains("Dear Mock,"));
        assert_eq!(state.result().unwrap().usage.total, 30);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn server_error_stays_on_main() {
        let store = MemoryStore::default();
        let mut state = ready_state(&store);
        state.begin_request(&store).unwrap();
        state.finish_request(decode_response(
            500,
            r#"{"error":{"message":"Internal server error"}}"#,
        ));

        assert!(!state.is_loading());
        assert_eq!(state.page(), Page::Main);
        assert_eq!(state.error(), Some("500 Internal server error"));
        assert!(state.result().is_none());
    }

    #[test]
    fn new_request_clears_previous_outcome() {
        let store = MemoryStore::default();
        let mut state = ready_state(&store);
        state.begin_request(&store).unwrap();
        state.finish_request(Err(CompletionError::EmptyResponse));
        assert_eq!(state.error(), Some("API response is empty"));

        state.begin_request(&store).unwrap();
        assert_eq!(state.error(), None);
    }

    #[test]
    fn settings_survive_reload() {
        let store = MemoryStore::default();
        let mut state = AppState::load(&store);
        state.navigate(Page::Settings);
        state.save_settings(&store, profile()).unwrap();
        assert_eq!(state.page(), Page::Main);

        let reloaded = AppState::load(&store);
        assert_eq!(reloaded.settings(), &profile());
        assert!(reloaded.is_settings_valid());
    }

    #[test]
    fn generation_params_survive_reload() {
        let store = MemoryStore::default();
        let mut state = ready_state(&store);
        state.update_draft(|d| {
            d.model = Model::Gpt4o;
            d.word_limit = Some(500);
        });
        state.begin_request(&store).unwrap();
        assert!(store.get_raw(MAIN_SETTINGS_KEY).unwrap().is_some());

        let reloaded = AppState::load(&store);
        assert_eq!(reloaded.draft().model, Model::Gpt4o);
        assert_eq!(reloaded.draft().word_limit, Some(500));
        // Text fields are session-local.
        assert!(reloaded.draft().job_description.is_empty());
    }

    #[test]
    fn draft_survives_settings_round_trip() {
        let store = MemoryStore::default();
        let mut state = AppState::load(&store);
        state.update_draft(|d| {
            d.salutation = "Dear Ada,".into();
            d.additional_notes = "Unsaved note".into();
        });

        state.navigate(Page::Settings);
        state.navigate(Page::Main);
        state.navigate(Page::Settings);

        assert_eq!(state.page(), Page::Settings);
        assert_eq!(state.draft().salutation, "Dear Ada,");
        assert_eq!(state.draft().additional_notes, "Unsaved note");
    }

    #[test]
    fn result_to_main_waits_for_slide() {
        let store = MemoryStore::default();
        let mut state = ready_state(&store);
        state.begin_request(&store).unwrap();
        state.finish_request(decode_response(200, MOCK_BODY));

        let Transition::Deferred { after, ticket } = state.navigate(Page::Main) else {
            panic!("expected a deferred transition");
        };
        assert_eq!(after, RETURN_DELAY);
        assert_eq!(state.navigator().slide(), Slide::Left);
        assert_eq!(state.page(), Page::Result);
        assert_eq!(state.navigator().pending(), Some(ticket));

        state.settle(ticket);
        assert_eq!(state.page(), Page::Main);
        assert_eq!(state.navigator().secondary(), Page::Settings);
        assert_eq!(state.navigator().pending(), None);
    }

    #[test]
    fn stale_settle_is_ignored() {
        let store = MemoryStore::default();
        let mut state = ready_state(&store);
        state.begin_request(&store).unwrap();
        state.finish_request(decode_response(200, MOCK_BODY));

        let Transition::Deferred { ticket, .. } = state.navigate(Page::Main) else {
            panic!("expected a deferred transition");
        };
        // Reopened before the slide finished.
        assert_eq!(state.navigate(Page::Result), Transition::Immediate);
        state.settle(ticket);
        assert_eq!(state.page(), Page::Result);
        assert_eq!(state.navigator().slide(), Slide::Right);
    }

    #[test]
    fn settings_to_main_is_immediate() {
        let mut state = AppState::default();
        assert_eq!(state.navigate(Page::Settings), Transition::Immediate);
        assert_eq!(state.navigator().slide(), Slide::Right);
        assert_eq!(state.navigate(Page::Main), Transition::Immediate);
        assert_eq!(state.page(), Page::Main);
    }

    #[test]
    fn result_page_needs_a_result() {
        let mut state = AppState::default();
        state.navigate(Page::Result);
        assert_eq!(state.page(), Page::Main);
    }

    #[test]
    fn estimate_tracks_draft_edits() {
        let mut state = AppState::default();
        let before = state.estimated_tokens();
        state.update_draft(|d| d.job_description = "word ".repeat(40));
        assert_eq!(state.estimated_tokens(), before + 50);
    }
}
