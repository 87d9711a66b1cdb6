use super::settings::{Settings, non_blank};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SALUTATION: &str = "Dear Hiring Manager,";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_WORD_LIMIT: u32 = 300;

pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 2.0;
pub const MIN_WORD_LIMIT: u32 = 100;

/// Chat models offered in the model picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl Model {
    pub const ALL: [Model; 4] = [
        Model::Gpt35Turbo,
        Model::Gpt4o,
        Model::Gpt4oMini,
        Model::Gpt4Turbo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt4Turbo => "gpt-4-turbo",
        }
    }

    pub fn parse(value: &str) -> Option<Model> {
        Model::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

/// The main form as the user is editing it.
///
/// Numeric fields are `None` while their input is empty or unparseable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainDraft {
    pub salutation: String,
    pub job_description: String,
    pub additional_notes: String,
    pub model: Model,
    pub temperature: Option<f64>,
    pub word_limit: Option<u32>,
}

impl Default for MainDraft {
    fn default() -> Self {
        Self {
            salutation: DEFAULT_SALUTATION.to_string(),
            job_description: String::new(),
            additional_notes: String::new(),
            model: Model::default(),
            temperature: Some(DEFAULT_TEMPERATURE),
            word_limit: Some(DEFAULT_WORD_LIMIT),
        }
    }
}

impl MainDraft {
    pub fn params(&self) -> Option<GenerationParams> {
        Some(GenerationParams {
            model: self.model,
            temperature: self.temperature?,
            word_limit: self.word_limit?,
        })
    }

    pub fn apply_params(&mut self, params: &GenerationParams) {
        self.model = params.model;
        self.temperature = Some(params.temperature);
        self.word_limit = Some(params.word_limit);
    }
}

/// Model parameters remembered between sessions under
/// [`crate::storage::MAIN_SETTINGS_KEY`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub model: Model,
    pub temperature: f64,
    pub word_limit: u32,
}

/// A complete payload for one generate action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub salutation: String,
    pub job_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub model: Model,
    pub temperature: f64,
    pub word_limit: u32,
    pub settings: Settings,
}

impl Submission {
    pub fn additional_notes(&self) -> Option<&str> {
        non_blank(self.additional_notes.as_deref())
    }
}

/// Draft and settings side by side, the shape fed to the token estimator
/// while the form is still being edited.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPayload<'a> {
    #[serde(flatten)]
    pub draft: &'a MainDraft,
    pub settings: &'a Settings,
}
