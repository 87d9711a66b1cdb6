use crate::models::{
    MAX_TEMPERATURE, MIN_TEMPERATURE, MIN_WORD_LIMIT, MainDraft, Settings, Submission,
};
use std::collections::HashSet;

pub const REQUIRED: &str = "Required";
pub const TEMPERATURE_RANGE: &str = "Enter a value between 0 and 2.0";
pub const WORD_LIMIT_RANGE: &str = "Enter a value of 100 or more";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Salutation,
    JobDescription,
    Temperature,
    WordLimit,
    ApiKey,
    Name,
    WorkExperience,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Field-level errors collected from one validation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn require(&mut self, field: Field, value: &str) {
        if value.trim().is_empty() {
            self.push(field, REQUIRED);
        }
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    /// Message for a field the user has already edited. Untouched fields stay
    /// quiet so a fresh form does not open full of errors.
    pub fn shown(&self, field: Field, touched: &HashSet<Field>) -> Option<&'static str> {
        if touched.contains(&field) { self.get(field) } else { None }
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

pub fn validate_settings(settings: &Settings) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.require(Field::ApiKey, &settings.api_key);
    errors.require(Field::Name, &settings.name);
    errors.require(Field::WorkExperience, &settings.work_experience);
    errors.into_result()
}

pub fn validate_draft(draft: &MainDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.require(Field::Salutation, &draft.salutation);
    errors.require(Field::JobDescription, &draft.job_description);

    match draft.temperature {
        None => errors.push(Field::Temperature, REQUIRED),
        Some(t) if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) => {
            errors.push(Field::Temperature, TEMPERATURE_RANGE)
        }
        Some(_) => {}
    }

    match draft.word_limit {
        None => errors.push(Field::WordLimit, REQUIRED),
        Some(w) if w < MIN_WORD_LIMIT => errors.push(Field::WordLimit, WORD_LIMIT_RANGE),
        Some(_) => {}
    }

    errors.into_result()
}

/// Builds the payload for a generate action, or every field error that
/// blocks it.
pub fn build_submission(
    draft: &MainDraft,
    settings: &Settings,
) -> Result<Submission, ValidationErrors> {
    let draft_errors = validate_draft(draft).err().unwrap_or_default();
    let settings_errors = validate_settings(settings).err().unwrap_or_default();

    let mut errors = draft_errors;
    errors.0.extend(settings_errors.0);
    if !errors.is_empty() {
        return Err(errors);
    }

    let (Some(temperature), Some(word_limit)) = (draft.temperature, draft.word_limit) else {
        return Err(errors);
    };

    let notes = draft.additional_notes.trim();
    Ok(Submission {
        salutation: draft.salutation.clone(),
        job_description: draft.job_description.clone(),
        additional_notes: (!notes.is_empty()).then(|| draft.additional_notes.clone()),
        model: draft.model,
        temperature,
        word_limit,
        settings: settings.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            api_key: "abc123".into(),
            name: "John Doe".into(),
            work_experience: "Lorem ipsum dolor sit amet.".into(),
            ..Default::default()
        }
    }

    fn valid_draft() -> MainDraft {
        MainDraft {
            job_description: "Lorem ipsum dolor sit amet, consectetur adipiscing elit.".into(),
            ..Default::default()
        }
    }

    #[test]
    fn filled_form_builds_submission() {
        let submission = build_submission(&valid_draft(), &valid_settings()).unwrap();
        assert_eq!(submission.salutation, "Dear Hiring Manager,");
        assert_eq!(submission.temperature, 0.7);
        assert_eq!(submission.word_limit, 300);
        assert_eq!(submission.additional_notes, None);
    }

    #[test]
    fn each_empty_required_field_blocks_submission() {
        type Clear = fn(&mut MainDraft, &mut Settings);
        let cases: [(Field, Clear); 7] = [
            (Field::Salutation, |d, _| d.salutation.clear()),
            (Field::JobDescription, |d, _| d.job_description = "  ".into()),
            (Field::Temperature, |d, _| d.temperature = None),
            (Field::WordLimit, |d, _| d.word_limit = None),
            (Field::ApiKey, |_, s| s.api_key.clear()),
            (Field::Name, |_, s| s.name.clear()),
            (Field::WorkExperience, |_, s| s.work_experience.clear()),
        ];

        for (field, clear) in cases {
            let mut draft = valid_draft();
            let mut settings = valid_settings();
            clear(&mut draft, &mut settings);
            let errors = build_submission(&draft, &settings).unwrap_err();
            assert_eq!(errors.get(field), Some(REQUIRED), "{field:?}");
        }
    }

    #[test]
    fn numeric_ranges() {
        let mut draft = valid_draft();
        for t in [-0.1, 2.01, f64::NAN] {
            draft.temperature = Some(t);
            assert_eq!(
                validate_draft(&draft).unwrap_err().get(Field::Temperature),
                Some(TEMPERATURE_RANGE)
            );
        }
        for t in [0.0, 1.0, 2.0] {
            draft.temperature = Some(t);
            assert!(validate_draft(&draft).is_ok());
        }

        draft.word_limit = Some(99);
        assert_eq!(
            validate_draft(&draft).unwrap_err().get(Field::WordLimit),
            Some(WORD_LIMIT_RANGE)
        );
        draft.word_limit = Some(100);
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn blank_notes_are_dropped() {
        let mut draft = valid_draft();
        draft.additional_notes = "   ".into();
        let submission = build_submission(&draft, &valid_settings()).unwrap();
        assert_eq!(submission.additional_notes, None);

        draft.additional_notes = "Mention relocation".into();
        let submission = build_submission(&draft, &valid_settings()).unwrap();
        assert_eq!(submission.additional_notes(), Some("Mention relocation"));
    }

    #[test]
    fn errors_wait_for_an_edit() {
        let errors = validate_settings(&Settings::default()).unwrap_err();
        let mut touched = HashSet::new();
        assert_eq!(errors.get(Field::ApiKey), Some(REQUIRED));
        assert_eq!(errors.shown(Field::ApiKey, &touched), None);

        touched.insert(Field::ApiKey);
        assert_eq!(errors.shown(Field::ApiKey, &touched), Some(REQUIRED));
        assert_eq!(errors.shown(Field::Name, &touched), None);
    }
}
