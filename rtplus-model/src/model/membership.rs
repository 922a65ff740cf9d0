//! Team memberships

use std::collections::HashSet;

use chrono::NaiveDate;
use rtplus_table::EditableRow;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::validate::Validate;

/// A person's membership of a team over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    pub id: Uuid,
    pub person_id: Uuid,
    pub team_id: Uuid,
    /// Role tags within the team (e.g. "Team Leader").
    pub tags: Vec<String>,
    pub start_date: NaiveDate,
    /// `None` while the membership is current.
    pub end_date: Option<NaiveDate>,
}

impl TeamMembership {
    /// A new membership of `team_id` starting on `start_date`, with no person
    /// chosen yet.
    pub fn draft(team_id: Uuid, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            person_id: Uuid::nil(),
            team_id,
            tags: Vec::new(),
            start_date,
            end_date: None,
        }
    }

    /// Returns `true` if the membership covers `date`.
    pub fn is_current_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.is_none_or(|end| date <= end)
    }
}

/// Partial update of a [`TeamMembership`]. `Some(None)` clears the end date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamMembershipPatch {
    pub person_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl EditableRow for TeamMembership {
    type Key = Uuid;
    type Patch = TeamMembershipPatch;

    fn key(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: TeamMembershipPatch) {
        if let Some(person_id) = patch.person_id {
            self.person_id = person_id;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
    }
}

impl Validate for TeamMembership {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.person_id.is_nil() {
            errors.add_with_code("personId", "Person is required", "required");
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                errors.add("endDate", "End date cannot be before start date");
            }
        }
        let mut seen = HashSet::new();
        for tag in &self.tags {
            if tag.trim().is_empty() {
                errors.add("tags", "Tags cannot be blank");
            } else if !seen.insert(tag.as_str()) {
                errors.add("tags", format!("Duplicate tag '{}'", tag));
            }
        }
        errors.into_result()
    }
}
