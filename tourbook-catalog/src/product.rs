use serde::{Deserialize, Serialize};

use crate::slot::TimeSlot;

/// A package option card shown in the booking modal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionCard {
    /// Option code, e.g. `entrance`
    pub value: String,

    /// Display title written back into cart cards
    pub title: String,

    /// Marked as selected when the modal is first shown
    #[serde(default)]
    pub preselected: bool,
}

/// An add-on with a quantity counter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddonItem {
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

/// The choices a tour offers, as rendered by the booking modal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TourProduct {
    pub options: Vec<OptionCard>,
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<TimeSlot>,
    pub languages: Vec<String>,
    #[serde(default)]
    pub addons: Vec<AddonItem>,
}

fn default_time_slots() -> Vec<TimeSlot> {
    [(9, 0), (12, 0), (15, 0)]
        .iter()
        .filter_map(|(h, m)| TimeSlot::new(*h, *m))
        .collect()
}

impl Default for TourProduct {
    fn default() -> Self {
        Self {
            options: vec![
                OptionCard {
                    value: "basic".to_string(),
                    title: "Boat Trip Only".to_string(),
                    preselected: true,
                },
                OptionCard {
                    value: "entrance".to_string(),
                    title: "Boat Trip + Island Entrance".to_string(),
                    preselected: false,
                },
                OptionCard {
                    value: "parasailing".to_string(),
                    title: "Boat Trip + Parasailing".to_string(),
                    preselected: false,
                },
            ],
            time_slots: default_time_slots(),
            languages: vec![
                "English".to_string(),
                "Arabic".to_string(),
                "German".to_string(),
                "Russian".to_string(),
            ],
            addons: vec![
                AddonItem { name: "Hotel Pickup".to_string(), price: 5.0 },
                AddonItem { name: "Lunch Box".to_string(), price: 8.5 },
                AddonItem { name: "Photo Package".to_string(), price: 12.0 },
            ],
        }
    }
}

impl TourProduct {
    /// The option selected when the modal opens: the preselected card,
    /// else the first card, else `basic`.
    pub fn initial_option(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.preselected)
            .or_else(|| self.options.first())
            .map(|o| o.value.as_str())
            .unwrap_or("basic")
    }

    pub fn option(&self, value: &str) -> Option<&OptionCard> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Card title, falling back to the option code
    pub fn option_title(&self, value: &str) -> String {
        self.option(value)
            .map(|o| o.title.trim().to_string())
            .unwrap_or_else(|| value.to_string())
    }

    pub fn has_time_slot(&self, slot: &TimeSlot) -> bool {
        self.time_slots.contains(slot)
    }

    /// Case-insensitive language lookup returning the canonical name
    pub fn find_language(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.languages
            .iter()
            .find(|l| l.to_lowercase() == wanted)
            .map(String::as_str)
    }

    pub fn addon(&self, name: &str) -> Option<&AddonItem> {
        self.addons.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_option_prefers_preselected() {
        let mut product = TourProduct::default();
        assert_eq!(product.initial_option(), "basic");

        product.options[0].preselected = false;
        product.options[2].preselected = true;
        assert_eq!(product.initial_option(), "parasailing");

        product.options[2].preselected = false;
        assert_eq!(product.initial_option(), "basic");

        product.options.clear();
        assert_eq!(product.initial_option(), "basic");
    }

    #[test]
    fn test_language_lookup_ignores_case() {
        let product = TourProduct::default();
        assert_eq!(product.find_language("german"), Some("German"));
        assert_eq!(product.find_language(" ENGLISH "), Some("English"));
        assert_eq!(product.find_language("Klingon"), None);
    }

    #[test]
    fn test_deserialize_with_default_slots() {
        let json = serde_json::json!({
            "options": [{ "value": "basic", "title": "Basic" }],
            "languages": ["English"]
        });
        let product: TourProduct = serde_json::from_value(json).unwrap();
        assert_eq!(product.time_slots.len(), 3);
        assert_eq!(product.time_slots[2].to_string(), "15:00");
        assert!(product.addons.is_empty());
        assert_eq!(product.option_title("entrance"), "entrance");
    }
}
