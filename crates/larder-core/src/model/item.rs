// ── Inventory item ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::item_id::ItemId;
use crate::error::CoreError;

/// The canonical inventory item.
///
/// `Item::default()` is the empty template used to reset forms and
/// selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub category: Category,
    pub receive_date: Option<NaiveDate>,
    pub has_expiration: bool,
    /// Only meaningful when `has_expiration` is set.
    pub expiration_date: Option<NaiveDate>,
}

impl Item {
    /// Whether this item has been assigned an id (i.e. was ever persisted).
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Drop a stale expiration date left behind when the expiration flag
    /// was switched off.
    pub fn normalize_expiration(&mut self) {
        if !self.has_expiration {
            self.expiration_date = None;
        }
    }

    /// The expiration date, if the item actually expires.
    pub fn effective_expiration(&self) -> Option<NaiveDate> {
        self.expiration_date.filter(|_| self.has_expiration)
    }

    /// Whether the item is past its expiration date as of `today`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.effective_expiration().is_some_and(|date| date < today)
    }

    /// Check the rules an item must satisfy before it is submitted.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("name is required"));
        }

        let Some(received) = self.receive_date else {
            return Err(CoreError::validation("receive date is required"));
        };

        if self.has_expiration {
            let Some(expires) = self.expiration_date else {
                return Err(CoreError::validation(
                    "expiration date is required when the item expires",
                ));
            };
            if expires < received {
                return Err(CoreError::validation(format!(
                    "expiration date {expires} is before receive date {received}"
                )));
            }
        }

        Ok(())
    }
}
