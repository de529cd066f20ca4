//! Skill frequency listing and lookup of users by skill.

use crate::error::AppError;
use crate::models::{FrequencyRange, Skill, UserWithRating};
use crate::sql::{bind_query_as, select_skills};
use sqlx::PgPool;

pub struct SkillService;

impl SkillService {
    pub async fn list(pool: &PgPool, range: FrequencyRange) -> Result<Vec<Skill>, AppError> {
        let q = select_skills(range);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let skills = bind_query_as(sqlx::query_as::<_, Skill>(&q.sql), &q.params)
            .fetch_all(pool)
            .await?;
        Ok(skills)
    }

    /// Users holding `slug`, highest rating first. See [`skill_name_from_slug`].
    pub async fn users_by_skill(pool: &PgPool, slug: &str) -> Result<Vec<UserWithRating>, AppError> {
        let skill_name = skill_name_from_slug(slug);
        let users = sqlx::query_as::<_, UserWithRating>(
            r#"
            SELECT u.user_id, u.name, u.company, u.email, us.rating
              FROM users u
              JOIN users_to_skills us ON us.user_id = u.user_id
             WHERE LOWER(us.skill_name) = LOWER($1)
             ORDER BY us.rating DESC, u.user_id
            "#,
        )
        .bind(&skill_name)
        .fetch_all(pool)
        .await?;
        Ok(users)
    }
}

/// Path form of a skill name: `django-rest-framework` stands for `django rest framework`.
/// Matching is case-insensitive, so only the separators are rewritten here.
pub fn skill_name_from_slug(slug: &str) -> String {
    slug.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_dashes_become_spaces() {
        assert_eq!(skill_name_from_slug("django-rest-framework"), "django rest framework");
        assert_eq!(skill_name_from_slug("Rust"), "Rust");
    }
}
