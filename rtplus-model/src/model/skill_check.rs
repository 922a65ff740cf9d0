//! Skill assessments recorded during a session

use chrono::NaiveDate;
use rtplus_table::EditableRow;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::validate::Validate;

/// Outcome of one skill check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckResult {
    #[default]
    Pending,
    Competent,
    NotYetCompetent,
}

/// One assessor's assessment of one assessee on one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCheck {
    pub id: Uuid,
    /// Assessment session the check belongs to.
    pub session_id: Uuid,
    pub skill_id: Uuid,
    pub assessee_id: Uuid,
    pub assessor_id: Uuid,
    pub result: CheckResult,
    pub notes: String,
    pub date: NaiveDate,
}

impl SkillCheck {
    /// A pending check in `session_id` assessed by `assessor_id`.
    pub fn draft(session_id: Uuid, assessor_id: Uuid, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            skill_id: Uuid::nil(),
            assessee_id: Uuid::nil(),
            assessor_id,
            result: CheckResult::Pending,
            notes: String::new(),
            date,
        }
    }
}

/// Partial update of a [`SkillCheck`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillCheckPatch {
    pub skill_id: Option<Uuid>,
    pub assessee_id: Option<Uuid>,
    pub result: Option<CheckResult>,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
}

impl EditableRow for SkillCheck {
    type Key = Uuid;
    type Patch = SkillCheckPatch;

    fn key(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: SkillCheckPatch) {
        if let Some(skill_id) = patch.skill_id {
            self.skill_id = skill_id;
        }
        if let Some(assessee_id) = patch.assessee_id {
            self.assessee_id = assessee_id;
        }
        if let Some(result) = patch.result {
            self.result = result;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

impl Validate for SkillCheck {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.skill_id.is_nil() {
            errors.add_with_code("skillId", "Skill is required", "required");
        }
        if self.assessee_id.is_nil() {
            errors.add_with_code("assesseeId", "Assessee is required", "required");
        } else if self.assessee_id == self.assessor_id {
            errors.add("assesseeId", "Assessors cannot assess themselves");
        }
        if self.result == CheckResult::NotYetCompetent && self.notes.trim().is_empty() {
            errors.add("notes", "Notes are required when the result is not yet competent");
        }
        errors.into_result()
    }
}
