use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct HardwareItem {
    pub item_id: i32,
    pub name: String,
    pub quantity_available: i32,
}

/// POST /hardware body and seed file record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewHardwareItem {
    pub name: Option<String>,
    pub quantity: Option<i32>,
}

/// One loan of a hardware unit. `return_date` is `None` while the unit is out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct HardwareTransaction {
    pub transaction_id: i32,
    pub item_id: i32,
    pub user_id: i32,
    pub checkout_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    CheckedOut,
    Returned,
}

impl HardwareTransaction {
    pub fn state(&self) -> TransactionState {
        match self.return_date {
            None => TransactionState::CheckedOut,
            Some(_) => TransactionState::Returned,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    pub item_id: Option<i32>,
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnRequest {
    pub transaction_id: Option<i32>,
}
