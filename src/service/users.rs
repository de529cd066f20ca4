//! User reads, partial updates, and skill-set replacement.

use crate::error::AppError;
use crate::models::{NewUser, SkillRating, User, UserUpdate};
use crate::phone::normalize_phone;
use crate::service::reconcile::{dedup_skills, reconcile, SkillDiff};
use crate::sql::{bind_query, update_user, UserColumns};
use sqlx::{PgConnection, PgPool};

/// Users with their skills aggregated into a JSON array sorted by skill name.
const SELECT_USERS: &str = r#"
    SELECT u.user_id, u.name, u.company, u.email, u.phone,
        (SELECT COALESCE(
                    json_agg(json_build_object('skill', us.skill_name, 'rating', us.rating)
                             ORDER BY us.skill_name),
                    '[]'::json)
           FROM users_to_skills us
          WHERE us.user_id = u.user_id) AS skills
      FROM users u
"#;

pub struct UserService;

impl UserService {
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, AppError> {
        let sql = format!("{} ORDER BY u.user_id", SELECT_USERS);
        tracing::debug!(sql = %sql, "query");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
        Ok(users)
    }

    pub async fn get(pool: &PgPool, user_id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("{} WHERE u.user_id = $1", SELECT_USERS);
        tracing::debug!(sql = %sql, user_id, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Apply field changes and, when `skills` is present, replace the skill set.
    /// Everything runs in one transaction; the returned user is read after commit.
    pub async fn update(pool: &PgPool, user_id: i32, body: UserUpdate) -> Result<User, AppError> {
        let mut tx = pool.begin().await?;
        let exists: Option<(i32,)> = sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("user does not exist".into()));
        }

        let cols = changed_columns(&body);
        if let Some(q) = update_user(user_id, &cols) {
            tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
            bind_query(sqlx::query(&q.sql), &q.params)
                .execute(&mut *tx)
                .await?;
        }
        if let Some(skills) = &body.skills {
            Self::replace_skills(&mut *tx, user_id, skills).await?;
        }
        tx.commit().await?;

        Self::get(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user does not exist".into()))
    }

    /// Insert one user (phone normalized) and its skills. Returns the new user id.
    pub async fn create(conn: &mut PgConnection, user: &NewUser) -> Result<i32, AppError> {
        let (user_id,): (i32,) = sqlx::query_as(
            "INSERT INTO users (name, company, email, phone) VALUES ($1, $2, $3, $4) RETURNING user_id",
        )
        .bind(&user.name)
        .bind(&user.company)
        .bind(&user.email)
        .bind(normalize_phone(&user.phone))
        .fetch_one(&mut *conn)
        .await?;
        let diff = SkillDiff {
            learned: dedup_skills(&user.skills),
            ..SkillDiff::default()
        };
        apply_skill_diff(conn, user_id, &diff).await?;
        Ok(user_id)
    }

    async fn replace_skills(
        conn: &mut PgConnection,
        user_id: i32,
        updated: &[SkillRating],
    ) -> Result<SkillDiff, AppError> {
        let rows: Vec<(String, i32)> = sqlx::query_as(
            "SELECT skill_name, rating FROM users_to_skills WHERE user_id = $1 ORDER BY skill_name FOR UPDATE",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
        let previous: Vec<SkillRating> = rows
            .into_iter()
            .map(|(skill, rating)| SkillRating { skill, rating })
            .collect();

        let diff = reconcile(&previous, updated);
        apply_skill_diff(conn, user_id, &diff).await?;

        tracing::info!(
            user_id,
            changed = diff.changed.len(),
            learned = diff.learned.len(),
            lost = diff.lost.len(),
            "skills reconciled"
        );
        Ok(diff)
    }
}

/// Non-empty submitted fields; the phone is stored in canonical form.
fn changed_columns(body: &UserUpdate) -> UserColumns {
    let present = |v: &Option<String>| v.as_ref().filter(|s| !s.trim().is_empty()).cloned();
    UserColumns {
        name: present(&body.name),
        company: present(&body.company),
        email: present(&body.email),
        phone: present(&body.phone).map(|p| normalize_phone(&p)),
    }
}

/// Write a skill diff for one user. Shared `skills` rows are touched first and
/// in name order; the user's own association rows follow.
async fn apply_skill_diff(conn: &mut PgConnection, user_id: i32, diff: &SkillDiff) -> Result<(), AppError> {
    for (skill, delta) in diff.frequency_deltas() {
        if delta > 0 {
            sqlx::query(
                "INSERT INTO skills (skill_name, frequency) VALUES ($1, 1) \
                 ON CONFLICT (skill_name) DO UPDATE SET frequency = skills.frequency + 1",
            )
            .bind(skill)
            .execute(&mut *conn)
            .await?;
        } else {
            // lost skills keep their row, even at zero
            sqlx::query("UPDATE skills SET frequency = frequency - 1 WHERE skill_name = $1")
                .bind(skill)
                .execute(&mut *conn)
                .await?;
        }
    }

    for s in &diff.changed {
        sqlx::query("UPDATE users_to_skills SET rating = $3 WHERE user_id = $1 AND skill_name = $2")
            .bind(user_id)
            .bind(&s.skill)
            .bind(s.rating)
            .execute(&mut *conn)
            .await?;
    }
    for s in &diff.learned {
        sqlx::query("INSERT INTO users_to_skills (user_id, skill_name, rating) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(&s.skill)
            .bind(s.rating)
            .execute(&mut *conn)
            .await?;
    }
    let lost = diff.lost_names();
    if !lost.is_empty() {
        sqlx::query("DELETE FROM users_to_skills WHERE user_id = $1 AND skill_name = ANY($2)")
            .bind(user_id)
            .bind(&lost)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_columns_skips_blank_and_normalizes_phone() {
        let body = UserUpdate {
            name: Some("".into()),
            company: Some("Acme".into()),
            email: None,
            phone: Some("(555) 123-4567".into()),
            skills: None,
        };
        let cols = changed_columns(&body);
        assert_eq!(cols.name, None);
        assert_eq!(cols.company.as_deref(), Some("Acme"));
        assert_eq!(cols.email, None);
        assert_eq!(cols.phone.as_deref(), Some("+1-555-123-4567"));
    }

    #[test]
    fn empty_body_changes_nothing() {
        assert!(changed_columns(&UserUpdate::default()).is_empty());
    }
}
