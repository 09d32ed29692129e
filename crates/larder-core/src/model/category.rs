// ── Item categories ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Fixed set of inventory categories.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Bakery,
    Pantry,
    Frozen,
    Beverages,
    Snacks,
    Household,
    #[default]
    Other,
}
