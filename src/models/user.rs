use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// One skill held by a user. `skill` is the skill name, matching the seed data shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRating {
    pub skill: String,
    pub rating: i32,
}

/// User with nested skills, sorted by skill name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    #[serde(rename = "id")]
    pub user_id: i32,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub skills: Json<Vec<SkillRating>>,
}

/// PUT /users/:id body. Absent or empty fields are left unchanged; `skills`, when
/// present, replaces the whole skill set.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<SkillRating>>,
}

/// Row of GET /users-by-skill/:skill.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserWithRating {
    pub user_id: i32,
    pub name: String,
    pub company: String,
    pub email: String,
    pub rating: i32,
}

/// Seed file record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<SkillRating>,
}
