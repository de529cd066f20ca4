use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Skill {
    pub skill_name: String,
    /// Number of users currently holding the skill.
    pub frequency: i32,
}

/// Optional bounds of GET /skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrequencyRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}
