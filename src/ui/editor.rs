//! Create-donation editor state.
//!
//! The editor is a modal on top of the dashboard. It owns only the text being
//! typed; submitting hands a validated draft to the create action, and the
//! dashboard closes the editor when that create succeeds. Outcomes are matched
//! by `request_id`, so a late result never lands on a newer editor.

use crate::donations::DonationDraft;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum EditorField {
    Title,
    #[strum(to_string = "Quantity (kg)")]
    Quantity,
    #[strum(to_string = "Pickup location")]
    Location,
}

impl EditorField {
    pub const ALL: [EditorField; 3] = [
        EditorField::Title,
        EditorField::Quantity,
        EditorField::Location,
    ];

    fn next(self) -> Self {
        match self {
            EditorField::Title => EditorField::Quantity,
            EditorField::Quantity => EditorField::Location,
            EditorField::Location => EditorField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            EditorField::Title => EditorField::Location,
            EditorField::Quantity => EditorField::Title,
            EditorField::Location => EditorField::Quantity,
        }
    }
}

/// What a key press asks the dashboard to do with the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    /// Keep editing.
    Continue,
    /// Close without side effects.
    Cancel,
    /// Dispatch the create action with this draft.
    Submit(DonationDraft),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonationEditor {
    /// Tags the create actions submitted from this editor.
    pub request_id: u64,
    pub title: String,
    pub quantity: String,
    pub location: String,
    pub focus: Option<EditorField>,
    /// Validation message from the last submit attempt.
    pub validation_error: Option<String>,
    /// A create action is in flight. The editor is locked until it resolves.
    pub submitting: bool,
}

impl DonationEditor {
    pub fn new(request_id: u64) -> Self {
        Self {
            request_id,
            title: String::new(),
            quantity: String::new(),
            location: String::new(),
            focus: Some(EditorField::Title),
            validation_error: None,
            submitting: false,
        }
    }

    pub fn focused(&self) -> EditorField {
        self.focus.unwrap_or(EditorField::Title)
    }

    pub fn value(&self, field: EditorField) -> &str {
        match field {
            EditorField::Title => &self.title,
            EditorField::Quantity => &self.quantity,
            EditorField::Location => &self.location,
        }
    }

    fn value_mut(&mut self, field: EditorField) -> &mut String {
        match field {
            EditorField::Title => &mut self.title,
            EditorField::Quantity => &mut self.quantity,
            EditorField::Location => &mut self.location,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorOutcome {
        if self.submitting {
            return EditorOutcome::Continue;
        }
        match key.code {
            KeyCode::Esc => return EditorOutcome::Cancel,
            KeyCode::Tab | KeyCode::Down => self.focus = Some(self.focused().next()),
            KeyCode::BackTab | KeyCode::Up => self.focus = Some(self.focused().previous()),
            KeyCode::Backspace => {
                self.value_mut(self.focused()).pop();
            }
            KeyCode::Char(c) => self.value_mut(self.focused()).push(c),
            KeyCode::Enter => return self.submit(),
            _ => {}
        }
        EditorOutcome::Continue
    }

    fn submit(&mut self) -> EditorOutcome {
        match DonationDraft::parse(&self.title, &self.quantity, &self.location) {
            Ok(draft) => {
                self.validation_error = None;
                self.submitting = true;
                EditorOutcome::Submit(draft)
            }
            Err(e) => {
                self.validation_error = Some(e.to_string());
                EditorOutcome::Continue
            }
        }
    }
}
