use serde::{Deserialize, Serialize};

/// Profile data reused across every generate action.
///
/// Stored as camelCase JSON under [`crate::storage::SETTINGS_KEY`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub api_key: String,
    pub name: String,
    pub work_experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_settings: Option<String>,
}

impl Settings {
    /// Optional fields trimmed, with blank values treated as absent.
    pub fn portfolio_site(&self) -> Option<&str> {
        non_blank(self.portfolio_site.as_deref())
    }

    pub fn skill_set(&self) -> Option<&str> {
        non_blank(self.skill_set.as_deref())
    }

    pub fn additional_settings(&self) -> Option<&str> {
        non_blank(self.additional_settings.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
