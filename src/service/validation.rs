//! Request body checks. Missing identifiers are `BadRequest`; bad values are `Validation`.

use crate::error::AppError;
use crate::models::{NewHardwareItem, UserUpdate};
use crate::phone::normalize_phone;

/// Column widths of the tables created in `store`.
const MAX_NAME: usize = 50;
const MAX_COMPANY: usize = 100;
const MAX_EMAIL: usize = 50;
const MAX_PHONE: usize = 25;
const MAX_SKILL_NAME: usize = 50;

fn check_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!("{} must be at most {} characters", field, max)));
    }
    Ok(())
}

pub struct RequestValidator;

impl RequestValidator {
    /// A required integer identifier from a JSON body.
    pub fn require_id(field: &str, value: Option<i32>) -> Result<i32, AppError> {
        value.ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
    }

    /// Name and quantity of a new hardware item.
    pub fn new_hardware(body: &NewHardwareItem) -> Result<(String, i32), AppError> {
        let name = body
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("name is required".into()))?;
        let quantity = body
            .quantity
            .ok_or_else(|| AppError::BadRequest("quantity is required".into()))?;
        check_len("name", name, MAX_NAME)?;
        if quantity < 0 {
            return Err(AppError::Validation("quantity must be at least 0".into()));
        }
        Ok((name.to_string(), quantity))
    }

    /// Fields of a user update that are present must be well-formed and fit their columns.
    pub fn user_update(body: &UserUpdate) -> Result<(), AppError> {
        let present = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        if let Some(name) = present(&body.name) {
            check_len("name", &name, MAX_NAME)?;
        }
        if let Some(company) = present(&body.company) {
            check_len("company", &company, MAX_COMPANY)?;
        }
        if let Some(email) = present(&body.email) {
            if !email.contains('@') || email.len() < 3 {
                return Err(AppError::Validation("email must be a valid email".into()));
            }
            check_len("email", &email, MAX_EMAIL)?;
        }
        if let Some(phone) = present(&body.phone) {
            check_len("phone", &normalize_phone(&phone), MAX_PHONE)?;
        }
        if let Some(skills) = &body.skills {
            for s in skills {
                if s.skill.trim().is_empty() {
                    return Err(AppError::Validation("skill name must not be empty".into()));
                }
                check_len("skill name", &s.skill, MAX_SKILL_NAME)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillRating;

    #[test]
    fn missing_id_names_the_field() {
        let err = RequestValidator::require_id("item_id", None).unwrap_err();
        assert_eq!(err.to_string(), "item_id is required");
        assert_eq!(RequestValidator::require_id("item_id", Some(4)).unwrap(), 4);
    }

    #[test]
    fn new_hardware_requires_name_and_non_negative_quantity() {
        let ok = NewHardwareItem {
            name: Some(" Arduino ".into()),
            quantity: Some(3),
        };
        assert_eq!(RequestValidator::new_hardware(&ok).unwrap(), ("Arduino".to_string(), 3));

        let no_name = NewHardwareItem {
            name: Some("".into()),
            quantity: Some(3),
        };
        assert!(matches!(RequestValidator::new_hardware(&no_name), Err(AppError::BadRequest(_))));

        let negative = NewHardwareItem {
            name: Some("Pi".into()),
            quantity: Some(-1),
        };
        assert!(matches!(RequestValidator::new_hardware(&negative), Err(AppError::Validation(_))));
    }

    #[test]
    fn user_update_rejects_bad_email_and_blank_skill() {
        let bad_email = UserUpdate {
            email: Some("nope".into()),
            ..Default::default()
        };
        assert!(RequestValidator::user_update(&bad_email).is_err());

        let blank_skill = UserUpdate {
            skills: Some(vec![SkillRating {
                skill: " ".into(),
                rating: 1,
            }]),
            ..Default::default()
        };
        assert!(RequestValidator::user_update(&blank_skill).is_err());

        let empty_email_is_ignored = UserUpdate {
            email: Some("".into()),
            ..Default::default()
        };
        assert!(RequestValidator::user_update(&empty_email_is_ignored).is_ok());
    }

    #[test]
    fn over_long_values_are_validation_errors() {
        let long = |n: usize| Some("é".repeat(n));
        for body in [
            UserUpdate { name: long(51), ..Default::default() },
            UserUpdate { company: long(101), ..Default::default() },
            UserUpdate { email: Some(format!("{}@x.io", "a".repeat(46))), ..Default::default() },
            UserUpdate { phone: Some("+1 555 123 4567 x 1234567890123".into()), ..Default::default() },
            UserUpdate {
                skills: Some(vec![SkillRating { skill: "s".repeat(51), rating: 1 }]),
                ..Default::default()
            },
        ] {
            assert!(
                matches!(RequestValidator::user_update(&body), Err(AppError::Validation(_))),
                "{:?}",
                body
            );
        }

        // widths count characters, not bytes
        let fits = UserUpdate { name: long(50), company: long(100), ..Default::default() };
        assert!(RequestValidator::user_update(&fits).is_ok());

        let long_item = NewHardwareItem { name: Some("h".repeat(51)), quantity: Some(1) };
        assert!(matches!(RequestValidator::new_hardware(&long_item), Err(AppError::Validation(_))));
    }
}
