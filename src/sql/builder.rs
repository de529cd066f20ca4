//! Builds the parameterized SELECT and UPDATE statements with optional clauses.

use crate::models::FrequencyRange;
use crate::sql::SqlParam;

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> u32 {
        self.params.push(v.into());
        self.params.len() as u32
    }
}

/// Column changes for one user. Only `Some` columns are written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserColumns {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UserColumns {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.company.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// SELECT skills ordered by frequency.
/// Both bounds give an inclusive range; a lone `min` or `max` is a strict bound.
pub fn select_skills(range: FrequencyRange) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = match (range.min, range.max) {
        (Some(min), Some(max)) => {
            let lo = q.push_param(min);
            let hi = q.push_param(max);
            format!(" WHERE frequency BETWEEN ${} AND ${}", lo, hi)
        }
        (Some(min), None) => format!(" WHERE frequency > ${}", q.push_param(min)),
        (None, Some(max)) => format!(" WHERE frequency < ${}", q.push_param(max)),
        (None, None) => String::new(),
    };
    q.sql = format!(
        "SELECT skill_name, frequency FROM skills{} ORDER BY frequency, skill_name",
        where_clause
    );
    q
}

/// UPDATE users SET only the provided columns. Returns `None` when nothing changes.
pub fn update_user(user_id: i32, cols: &UserColumns) -> Option<QueryBuf> {
    if cols.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (name, value) in [
        ("name", &cols.name),
        ("company", &cols.company),
        ("email", &cols.email),
        ("phone", &cols.phone),
    ] {
        if let Some(v) = value {
            let n = q.push_param(v.as_str());
            sets.push(format!("{} = ${}", name, n));
        }
    }
    let id_param = q.push_param(user_id);
    q.sql = format!(
        "UPDATE users SET {} WHERE user_id = ${} RETURNING user_id",
        sets.join(", "),
        id_param
    );
    Some(q)
}
