pub mod copiable_textarea;
pub mod cover_letter_page;
pub mod main_form;
pub mod settings_form;
pub mod spinner;
pub mod token_count;
