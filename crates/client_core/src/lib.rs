pub mod answer;
pub mod catalog;
pub mod config;
pub mod controller;

pub use answer::{answers_match, normalize_answer};
pub use catalog::{CatalogClient, CatalogSource};
pub use config::{load_settings, load_settings_from, CatalogSettings};
pub use controller::{RoundController, RoundEvent};
