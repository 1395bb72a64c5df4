//! Per-venue classification settings.
//!
//! Venues whose ordinary article titles look like "Author: Title" need the
//! stricter italic-only gate; dedicated review venues skip the classifier
//! altogether. Unknown venues fall back to [`VenueProfile::default`].

use std::collections::BTreeMap;

use bookrev_core::Strictness;
use bookrev_core::config_file::{ConfigFile, VenueConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueProfile {
    pub strictness: Strictness,
    /// Every item in the venue is a review.
    pub all_reviews: bool,
}

impl VenueProfile {
    pub const fn new(strictness: Strictness, all_reviews: bool) -> Self {
        Self {
            strictness,
            all_reviews,
        }
    }

    fn apply(&mut self, overrides: &VenueConfig) {
        if let Some(s) = overrides.strictness {
            self.strictness = s;
        }
        if let Some(all) = overrides.all_reviews {
            self.all_reviews = all;
        }
    }
}

const ITALIC: VenueProfile = VenueProfile::new(Strictness::ItalicOnly, false);
const LENIENT: VenueProfile = VenueProfile::new(Strictness::Lenient, false);
const REVIEWS_ONLY: VenueProfile = VenueProfile::new(Strictness::Lenient, true);

const BUILTIN_VENUES: &[(&str, VenueProfile)] = &[
    ("Ancient Philosophy", ITALIC),
    ("Australasian Journal of Philosophy", ITALIC),
    ("Business Ethics Quarterly", LENIENT),
    ("Continental Philosophy Review", LENIENT),
    ("Dialogue", LENIENT),
    ("Economics and Philosophy", LENIENT),
    ("Environmental Ethics", LENIENT),
    ("Erkenntnis", ITALIC),
    ("Ethics", ITALIC),
    ("European Journal of Philosophy", ITALIC),
    ("Faith and Philosophy", ITALIC),
    ("History of Political Economy", ITALIC),
    ("Hypatia", ITALIC),
    ("Inquiry", ITALIC),
    ("Journal of Applied Philosophy", ITALIC),
    ("Journal of Moral Philosophy", ITALIC),
    ("Journal of the History of Philosophy", ITALIC),
    ("Mind", ITALIC),
    ("Philosophical Books", VenueProfile::new(Strictness::ItalicOnly, true)),
    ("Philosophy", ITALIC),
    ("Philosophy East and West", ITALIC),
    ("Philosophy in Review", REVIEWS_ONLY),
    ("Philosophy of Science", ITALIC),
    ("Political Theory", ITALIC),
    ("Religious Studies", LENIENT),
    ("Sophia", ITALIC),
    ("The Journal of Value Inquiry", LENIENT),
    ("The Philosophical Quarterly", ITALIC),
    ("The Philosophical Review", ITALIC),
    ("The Review of Austrian Economics", LENIENT),
    ("The Review of Metaphysics", ITALIC),
    ("Utilitas", ITALIC),
];

/// Venue name → profile. Lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueProfiles {
    profiles: BTreeMap<String, (String, VenueProfile)>,
}

fn key(venue: &str) -> String {
    venue.trim().to_lowercase()
}

impl VenueProfiles {
    /// An empty table: every venue gets the lenient default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in venue table.
    pub fn builtin() -> Self {
        let mut profiles = Self::empty();
        for (name, profile) in BUILTIN_VENUES {
            profiles.insert(name, *profile);
        }
        profiles
    }

    /// Built-in table overlaid with `[venues.<name>]` sections of `config`.
    pub fn from_config(config: &ConfigFile) -> Self {
        let mut profiles = Self::builtin();
        if let Some(venues) = &config.venues {
            for (name, overrides) in venues {
                profiles.apply(name, overrides);
            }
        }
        profiles
    }

    pub fn insert(&mut self, venue: &str, profile: VenueProfile) {
        self.profiles
            .insert(key(venue), (venue.trim().to_string(), profile));
    }

    /// Merge field-level overrides into the venue's current profile.
    pub fn apply(&mut self, venue: &str, overrides: &VenueConfig) {
        let entry = self
            .profiles
            .entry(key(venue))
            .or_insert_with(|| (venue.trim().to_string(), VenueProfile::default()));
        entry.1.apply(overrides);
    }

    /// Profile for `venue`, or the lenient default for unknown venues.
    pub fn get(&self, venue: &str) -> VenueProfile {
        self.profiles
            .get(&key(venue))
            .map(|(_, p)| *p)
            .unwrap_or_default()
    }

    pub fn contains(&self, venue: &str) -> bool {
        self.profiles.contains_key(&key(venue))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Configured venues in case-insensitive name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, VenueProfile)> {
        self.profiles.values().map(|(name, p)| (name.as_str(), *p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_ignores_case() {
        let profiles = VenueProfiles::builtin();
        assert_eq!(profiles.get("ethics").strictness, Strictness::ItalicOnly);
        assert_eq!(profiles.get("  UTILITAS ").strictness, Strictness::ItalicOnly);
        assert!(profiles.get("Philosophy in Review").all_reviews);
        assert_eq!(profiles.get("Dialogue").strictness, Strictness::Lenient);
    }

    #[test]
    fn test_unknown_venue_is_lenient() {
        let profiles = VenueProfiles::builtin();
        assert!(!profiles.contains("Journal of Imaginary Studies"));
        assert_eq!(
            profiles.get("Journal of Imaginary Studies"),
            VenueProfile::default()
        );
    }

    #[test]
    fn test_config_overrides_single_field() {
        let mut venues = BTreeMap::new();
        venues.insert(
            "Ethics".to_string(),
            VenueConfig {
                strictness: None,
                all_reviews: Some(true),
            },
        );
        venues.insert(
            "New Venue".to_string(),
            VenueConfig {
                strictness: Some(Strictness::ItalicOnly),
                all_reviews: None,
            },
        );
        let config = ConfigFile {
            venues: Some(venues),
            ..Default::default()
        };
        let profiles = VenueProfiles::from_config(&config);

        let ethics = profiles.get("Ethics");
        assert_eq!(ethics.strictness, Strictness::ItalicOnly);
        assert!(ethics.all_reviews);
        assert_eq!(profiles.get("new venue").strictness, Strictness::ItalicOnly);
        assert_eq!(profiles.len(), BUILTIN_VENUES.len() + 1);
    }

    #[test]
    fn test_iter_keeps_display_names() {
        let mut profiles = VenueProfiles::empty();
        profiles.insert("Mind", ITALIC);
        profiles.insert("dialogue", LENIENT);
        let names: Vec<&str> = profiles.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["dialogue", "Mind"]);
    }
}
