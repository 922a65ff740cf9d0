//! Personnel records

use email_address::EmailAddress;
use rtplus_table::EditableRow;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::validate::{Validate, require};

/// Membership status of a person within the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonStatus {
    #[default]
    Active,
    Inactive,
    Trainee,
}

/// A member of the organization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub email: Option<String>,
    pub callsign: Option<String>,
    pub status: PersonStatus,
}

impl Person {
    /// A blank person with a fresh id, used as the new-row template.
    pub fn draft() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
            .trim()
            .to_string()
    }
}

/// Partial update of a [`Person`].
///
/// `email` and `callsign` are doubly optional: `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonPatch {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<Option<String>>,
    pub callsign: Option<Option<String>>,
    pub status: Option<PersonStatus>,
}

impl EditableRow for Person {
    type Key = Uuid;
    type Patch = PersonPatch;

    fn key(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: PersonPatch) {
        if let Some(given_name) = patch.given_name {
            self.given_name = given_name;
        }
        if let Some(family_name) = patch.family_name {
            self.family_name = family_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(callsign) = patch.callsign {
            self.callsign = callsign;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl Validate for Person {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "givenName", &self.given_name, "Given name");
        require(&mut errors, "familyName", &self.family_name, "Family name");
        if let Some(email) = &self.email {
            if !EmailAddress::is_valid(email) {
                errors.add_with_code("email", "Invalid email address", "email");
            }
        }
        if let Some(callsign) = &self.callsign {
            if callsign.chars().any(char::is_whitespace) {
                errors.add("callsign", "Callsign cannot contain spaces");
            }
        }
        errors.into_result()
    }
}
