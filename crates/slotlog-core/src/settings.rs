//! Application settings: day bounds, categories and color overrides.
//!
//! Settings are persisted under the `settings` key. Preference fields this
//! crate does not interpret (sound, theme, timer style, ...) are kept in
//! `preferences` and written back unchanged.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SlotlogError};
use crate::stats::FALLBACK_PALETTE;
use crate::storage::{default_categories, Category};

pub const DEFAULT_START_HOUR: u8 = 8;
pub const DEFAULT_END_HOUR: u8 = 20;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
});

/// Whether `color` is a `#rgb` or `#rrggbb` hex string.
pub fn is_hex_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

fn default_start_hour() -> u8 {
    DEFAULT_START_HOUR
}

fn default_end_hour() -> u8 {
    DEFAULT_END_HOUR
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_start_hour")]
    pub start_hour: u8,

    /// Overnight when `end_hour <= start_hour`
    #[serde(default = "default_end_hour")]
    pub end_hour: u8,

    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,

    /// Category name to hex color, taking precedence over the category's own
    #[serde(default)]
    pub color_overrides: BTreeMap<String, String>,

    #[serde(flatten)]
    pub preferences: Map<String, Value>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            categories: default_categories(),
            color_overrides: BTreeMap::new(),
            preferences: Map::new(),
        }
    }
}

impl AppSettings {
    /// Check hours, category names and colors.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        validate_hours(self.start_hour, self.end_hour)?;

        let mut seen: Vec<String> = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(SlotlogError::Validation(
                    "category names must not be empty".to_string(),
                ));
            }
            let key = name.to_lowercase();
            if seen.contains(&key) {
                return Err(SlotlogError::Validation(format!(
                    "duplicate category name: {}",
                    name
                )));
            }
            seen.push(key);
            if !category.color.is_empty() && !is_hex_color(&category.color) {
                return Err(SlotlogError::Validation(format!(
                    "invalid color for {}: {}",
                    name, category.color
                )));
            }
        }
        for (name, color) in &self.color_overrides {
            if !is_hex_color(color) {
                return Err(SlotlogError::Validation(format!(
                    "invalid color override for {}: {}",
                    name, color
                )));
            }
        }
        Ok(())
    }

    /// Configured categories with color overrides applied. An empty list
    /// yields the default set.
    pub fn resolved_categories(&self) -> Vec<Category> {
        let base = if self.categories.is_empty() {
            default_categories()
        } else {
            self.categories.clone()
        };
        base.into_iter()
            .map(|mut category| {
                if let Some(color) = self.color_overrides.get(&category.name) {
                    category.color = color.clone();
                }
                category
            })
            .collect()
    }

    /// Resolved category whose name matches `name` ignoring case.
    pub fn find_category(&self, name: &str) -> Option<Category> {
        let name = name.trim();
        self.resolved_categories()
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// An empty list stands for the defaults; edits start from them.
    fn materialize_defaults(&mut self) {
        if self.categories.is_empty() {
            self.categories = default_categories();
        }
    }

    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` when the hours are out of range.
    pub fn set_hours(&mut self, start_hour: u8, end_hour: u8) -> Result<()> {
        validate_hours(start_hour, end_hour)?;
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        Ok(())
    }

    /// Add a category. Without a color the next palette color is used.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` for a blank or duplicate name, or an
    /// invalid color.
    pub fn add_category(&mut self, name: &str, color: Option<&str>) -> Result<Category> {
        self.materialize_defaults();
        let name = name.trim();
        if name.is_empty() {
            return Err(SlotlogError::Validation(
                "category names must not be empty".to_string(),
            ));
        }
        if self.find_category(name).is_some() {
            return Err(SlotlogError::Validation(format!(
                "category already exists: {}",
                name
            )));
        }
        let color = match color {
            Some(color) if is_hex_color(color) => color.to_string(),
            Some(color) => {
                return Err(SlotlogError::Validation(format!("invalid color: {}", color)))
            }
            None => FALLBACK_PALETTE[self.categories.len() % FALLBACK_PALETTE.len()].to_string(),
        };
        let category = Category::new(self.unique_id(name), name, color);
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Remove a category by name (ignoring case). Entries using it are left
    /// alone and aggregate as `Uncategorized` from now on. Removing the last
    /// category brings the defaults back.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::NotFound` if no such category exists.
    pub fn remove_category(&mut self, name: &str) -> Result<Category> {
        self.materialize_defaults();
        let index = self
            .categories
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| SlotlogError::NotFound(format!("category {}", name.trim())))?;
        let removed = self.categories.remove(index);
        self.color_overrides.remove(&removed.name);
        Ok(removed)
    }

    /// Override the display color of a category.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::NotFound` for an unknown category and
    /// `SlotlogError::Validation` for an invalid color.
    pub fn set_color(&mut self, name: &str, color: &str) -> Result<()> {
        if !is_hex_color(color) {
            return Err(SlotlogError::Validation(format!("invalid color: {}", color)));
        }
        let name = self
            .find_category(name)
            .map(|c| c.name)
            .ok_or_else(|| SlotlogError::NotFound(format!("category {}", name.trim())))?;
        self.color_overrides.insert(name, color.to_string());
        Ok(())
    }

    fn unique_id(&self, name: &str) -> String {
        let slug: String = name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        let base = if slug.is_empty() { "category".to_string() } else { slug };
        let taken = |id: &str| self.categories.iter().any(|c| c.id == id);
        if !taken(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }
}

fn validate_hours(start_hour: u8, end_hour: u8) -> Result<()> {
    if start_hour >= 24 {
        return Err(SlotlogError::Validation(format!(
            "start hour must be between 0 and 23, got {}",
            start_hour
        )));
    }
    if end_hour > 24 {
        return Err(SlotlogError::Validation(format!(
            "end hour must be between 0 and 24, got {}",
            end_hour
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!((settings.start_hour, settings.end_hour), (8, 20));
        assert_eq!(settings.categories.len(), 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: AppSettings = serde_json::from_value(json!({ "endHour": 4 })).unwrap();
        assert_eq!(settings.start_hour, 8);
        assert_eq!(settings.end_hour, 4);
        assert_eq!(settings.categories, default_categories());
    }

    #[test]
    fn test_unknown_preferences_round_trip() {
        let raw = json!({
            "startHour": 6,
            "endHour": 22,
            "categories": [],
            "colorOverrides": {},
            "soundEnabled": true,
            "theme": "dark"
        });
        let settings: AppSettings = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(settings.preferences.get("theme"), Some(&json!("dark")));
        assert_eq!(serde_json::to_value(&settings).unwrap(), raw);
    }

    #[test]
    fn test_hour_validation() {
        let mut settings = AppSettings::default();
        assert!(settings.set_hours(22, 4).is_ok());
        assert!(settings.set_hours(0, 24).is_ok());
        assert!(matches!(settings.set_hours(24, 4), Err(SlotlogError::Validation(_))));
        assert!(matches!(settings.set_hours(8, 25), Err(SlotlogError::Validation(_))));
        assert_eq!((settings.start_hour, settings.end_hour), (0, 24));
    }

    #[test]
    fn test_hex_colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#3B82F6"));
        assert!(!is_hex_color("3b82f6"));
        assert!(!is_hex_color("#3b82f"));
        assert!(!is_hex_color("#ggg"));
    }

    #[test]
    fn test_add_and_remove_category() {
        let mut settings = AppSettings::default();
        let added = settings.add_category("Side Project", Some("#123456")).unwrap();
        assert_eq!(added.id, "side-project");
        assert!(settings.find_category("side project").is_some());

        assert!(matches!(
            settings.add_category("work", None),
            Err(SlotlogError::Validation(_))
        ));
        assert!(matches!(
            settings.add_category("  ", None),
            Err(SlotlogError::Validation(_))
        ));

        let removed = settings.remove_category("SIDE PROJECT").unwrap();
        assert_eq!(removed.name, "Side Project");
        assert!(matches!(
            settings.remove_category("Side Project"),
            Err(SlotlogError::NotFound(_))
        ));
    }

    #[test]
    fn test_color_override_applies_to_resolved_categories() {
        let mut settings = AppSettings::default();
        settings.set_color("work", "#000").unwrap();
        let work = settings
            .resolved_categories()
            .into_iter()
            .find(|c| c.name == "Work")
            .unwrap();
        assert_eq!(work.color, "#000");
        assert!(matches!(
            settings.set_color("Nope", "#000"),
            Err(SlotlogError::NotFound(_))
        ));
        assert!(matches!(
            settings.set_color("Work", "black"),
            Err(SlotlogError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_category_list_resolves_to_defaults() {
        let settings = AppSettings {
            categories: Vec::new(),
            ..AppSettings::default()
        };
        assert_eq!(settings.resolved_categories(), default_categories());
    }

    #[test]
    fn test_empty_category_list_edits_start_from_defaults() {
        let empty = AppSettings {
            categories: Vec::new(),
            ..AppSettings::default()
        };
        assert_eq!(empty.find_category("work").unwrap().name, "Work");

        let mut settings = empty.clone();
        settings.set_color("work", "#000").unwrap();
        assert_eq!(settings.find_category("Work").unwrap().color, "#000");

        let mut settings = empty.clone();
        let removed = settings.remove_category("Work").unwrap();
        assert_eq!(removed.name, "Work");
        assert_eq!(settings.resolved_categories().len(), 4);
        assert!(settings.find_category("work").is_none());

        let mut settings = empty;
        settings.add_category("Reading", None).unwrap();
        assert_eq!(settings.resolved_categories().len(), 6);
        assert!(settings.find_category("Meetings").is_some());
    }

    #[test]
    fn test_duplicate_names_fail_validation() {
        let mut settings = AppSettings::default();
        settings.categories.push(Category::new("w2", "WORK", "#fff"));
        assert!(matches!(settings.validate(), Err(SlotlogError::Validation(_))));
    }
}
