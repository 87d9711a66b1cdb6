use crate::models::{ChatCompletionRequest, ChatMessage, Submission};

/// Ordered instruction messages for one cover letter, ending with the job
/// description. Optional profile fields and notes only appear when non-blank.
pub fn build_messages(submission: &Submission) -> Vec<ChatMessage> {
    let settings = &submission.settings;
    let mut messages = vec![
        ChatMessage::system(format!(
            "You are an expert in recruitment and job applications. Write a cover letter for this job no more than {} words long. Explain why the user is a good fit for the job.",
            submission.word_limit
        )),
        ChatMessage::system("Do not start with a subject line"),
        ChatMessage::system(
            "Only mention skills included in the users work experience. Do not improvise mention of other skills if the user has not specified them.",
        ),
        ChatMessage::system(format!(
            "Use the users work experience to explain why they are a good fit for the job: {}",
            settings.work_experience
        )),
        ChatMessage::system(format!(
            "Make sure to include the salutation {}",
            submission.salutation
        )),
    ];

    if let Some(site) = settings.portfolio_site() {
        messages.push(ChatMessage::system(format!(
            "Include a paragraph with one sentence like: A selection of my work can be viewed at {}",
            site
        )));
    }
    if let Some(skills) = settings.skill_set() {
        messages.push(ChatMessage::system(format!(
            "The user has the following skills: {}",
            skills
        )));
    }
    if let Some(extra) = settings.additional_settings() {
        messages.push(ChatMessage::user(extra));
    }
    if let Some(notes) = submission.additional_notes() {
        messages.push(ChatMessage::user(notes));
    }

    messages.push(ChatMessage::system(format!(
        "Sign off with the users name {}",
        settings.name
    )));
    messages.push(ChatMessage::user(format!(
        "Here is a job description, write a cover letter for this job on behalf of the user: {}.",
        submission.job_description
    )));

    messages
}

pub fn build_request(submission: &Submission) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: submission.model.as_str().to_string(),
        temperature: submission.temperature,
        messages: build_messages(submission),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Model, ROLE_SYSTEM, ROLE_USER, Settings};

    fn submission() -> Submission {
        Submission {
            salutation: "Dear Ms. Smith,".into(),
            job_description: "Build the platform".into(),
            additional_notes: None,
            model: Model::Gpt4oMini,
            temperature: 0.4,
            word_limit: 250,
            settings: Settings {
                api_key: "abc123".into(),
                name: "John Doe".into(),
                work_experience: "Four years of Rust".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn minimal_submission_has_fixed_sequence() {
        let messages = build_messages(&submission());
        assert_eq!(messages.len(), 7);
        assert!(messages[0].content.contains("no more than 250 words"));
        assert_eq!(messages[1].content, "Do not start with a subject line");
        assert!(messages[3].content.ends_with(": Four years of Rust"));
        assert_eq!(
            messages[4].content,
            "Make sure to include the salutation Dear Ms. Smith,"
        );
        assert_eq!(messages[5].content, "Sign off with the users name John Doe");
        assert_eq!(messages[6].role, ROLE_USER);
        assert_eq!(
            messages[6].content,
            "Here is a job description, write a cover letter for this job on behalf of the user: Build the platform."
        );
        assert!(messages[..6].iter().all(|m| m.role == ROLE_SYSTEM));
    }

    #[test]
    fn optional_fields_slot_in_before_sign_off() {
        let mut s = submission();
        s.settings.portfolio_site = Some("https://example.com".into());
        s.settings.skill_set = Some("Rust, Yew".into());
        s.settings.additional_settings = Some("Use British English".into());
        s.additional_notes = Some("Mention relocation".into());

        let messages = build_messages(&s);
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(messages.len(), 11);
        assert_eq!(
            contents[5],
            "Include a paragraph with one sentence like: A selection of my work can be viewed at https://example.com"
        );
        assert_eq!(contents[6], "The user has the following skills: Rust, Yew");
        assert_eq!(contents[7], "Use British English");
        assert_eq!(messages[7].role, ROLE_USER);
        assert_eq!(contents[8], "Mention relocation");
        assert!(contents[9].starts_with("Sign off"));
    }

    #[test]
    fn blank_optionals_are_skipped() {
        let mut s = submission();
        s.settings.portfolio_site = Some("  ".into());
        s.settings.skill_set = Some(String::new());
        assert_eq!(build_messages(&s).len(), 7);
    }

    #[test]
    fn request_carries_model_and_temperature() {
        let request = build_request(&submission());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"].as_array().unwrap().len(), 7);
        assert!((json["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
    }
}
