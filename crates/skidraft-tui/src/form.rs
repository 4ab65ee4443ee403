// Contents of the add/edit player overlay.
//
// Fields are kept as the raw text the user typed; conversion to a
// `FormInput` happens on submit so a bad stat can be reported without
// losing what was entered.

use std::path::PathBuf;

use skidraft_app::protocol::{EditPrefill, FormInput};
use skidraft_core::nationality::{self, Nationality};

pub const STAT_HINT: &str = "Stats must be whole numbers.";

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Team,
    Nationality,
    Ski,
    Drnk,
    Chaos,
    Coord,
    Photo,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Name,
        FormField::Team,
        FormField::Nationality,
        FormField::Ski,
        FormField::Drnk,
        FormField::Chaos,
        FormField::Coord,
        FormField::Photo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Team => "Team",
            FormField::Nationality => "Nationality",
            FormField::Ski => "SKI",
            FormField::Drnk => "DRNK",
            FormField::Chaos => "CHAOS",
            FormField::Coord => "COORD",
            FormField::Photo => "Photo file",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Id of the player being edited; `None` when creating.
    pub editing: Option<String>,
    pub name: String,
    pub team: String,
    /// Index into the nationality table; `None` shows the placeholder.
    pub nationality: Option<usize>,
    pub ski: String,
    pub drnk: String,
    pub chaos: String,
    pub coord: String,
    pub photo_path: String,
    pub focus: FormField,
    /// Validation or rejection message shown under the fields.
    pub hint: Option<String>,
}

impl FormState {
    pub fn from_prefill(prefill: &EditPrefill) -> Self {
        FormState {
            editing: Some(prefill.id.clone()),
            name: prefill.name.clone(),
            team: prefill.team.clone(),
            nationality: prefill
                .flag_id
                .as_deref()
                .and_then(|id| nationality::all().iter().position(|n| n.id == id)),
            ski: prefill.ski.to_string(),
            drnk: prefill.drnk.to_string(),
            chaos: prefill.chaos.to_string(),
            coord: prefill.coord.to_string(),
            ..FormState::default()
        }
    }

    pub fn selected_nationality(&self) -> Option<&'static Nationality> {
        self.nationality.and_then(|i| nationality::all().get(i))
    }

    /// The editable text behind a field. The nationality selector has none.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Team => Some(&mut self.team),
            FormField::Nationality => None,
            FormField::Ski => Some(&mut self.ski),
            FormField::Drnk => Some(&mut self.drnk),
            FormField::Chaos => Some(&mut self.chaos),
            FormField::Coord => Some(&mut self.coord),
            FormField::Photo => Some(&mut self.photo_path),
        }
    }

    /// Display text for a field.
    pub fn display(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Team => self.team.clone(),
            FormField::Nationality => self
                .selected_nationality()
                .map(|n| n.label.to_string())
                .unwrap_or_else(|| "Select nationality".to_string()),
            FormField::Ski => self.ski.clone(),
            FormField::Drnk => self.drnk.clone(),
            FormField::Chaos => self.chaos.clone(),
            FormField::Coord => self.coord.clone(),
            FormField::Photo => self.photo_path.clone(),
        }
    }

    /// Step through placeholder -> table entries -> placeholder.
    pub fn cycle_nationality(&mut self, forward: bool) {
        let len = nationality::all().len();
        self.nationality = match (self.nationality, forward) {
            (None, true) => Some(0),
            (None, false) => len.checked_sub(1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(_), true) => None,
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
    }

    /// Convert to the submitted form, or the hint to show instead.
    pub fn to_input(&self) -> Result<FormInput, String> {
        let photo = self.photo_path.trim();
        Ok(FormInput {
            name: self.name.clone(),
            team: self.team.clone(),
            flag_id: self.selected_nationality().map(|n| n.id.to_string()),
            ski: parse_stat(&self.ski)?,
            drnk: parse_stat(&self.drnk)?,
            chaos: parse_stat(&self.chaos)?,
            coord: parse_stat(&self.coord)?,
            photo_path: (!photo.is_empty()).then(|| PathBuf::from(photo)),
        })
    }
}

fn parse_stat(text: &str) -> Result<i32, String> {
    text.trim().parse::<i32>().map_err(|_| STAT_HINT.to_string())
}
