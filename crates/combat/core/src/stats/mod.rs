//! Character stat system.
//!
//! - [`attributes`]: the six-attribute block and modifiers
//! - [`bonus`]: additive equipment bonuses
//! - [`derived`]: armor class, initiative, proficiency, HP and mana

pub mod attributes;
pub mod bonus;
pub mod derived;

pub use attributes::{Attribute, AttributeScores, modifier};
pub use bonus::StatBonuses;
pub use derived::{DerivedStats, proficiency_bonus};
