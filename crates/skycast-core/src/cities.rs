//! Saved cities and favorites for the manage-locations screen.

use std::collections::HashMap;

/// Ordered city list with a favorites subset and per-city weather text.
///
/// Duplicate names are allowed in `cities`. A name can only become a
/// favorite while it is in `cities`; removing its last occurrence drops it
/// from favorites and forgets its weather text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityList {
    cities: Vec<String>,
    favorites: Vec<String>,
    weather: HashMap<String, String>,
}

impl CityList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.iter().any(|f| f == name)
    }

    /// Weather text last fetched for `name`, if any
    pub fn weather_for(&self, name: &str) -> Option<&str> {
        self.weather.get(name).map(String::as_str)
    }

    /// Append a trimmed name. Blank input is ignored. Returns true if added.
    pub fn add_city(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.cities.push(name.to_string());
        true
    }

    /// Remove the first entry equal to `name`. Returns true if one was removed.
    pub fn remove_city(&mut self, name: &str) -> bool {
        let Some(pos) = self.cities.iter().position(|c| c == name) else {
            return false;
        };
        self.cities.remove(pos);

        if !self.cities.iter().any(|c| c == name) {
            self.favorites.retain(|f| f != name);
            self.weather.remove(name);
        }
        true
    }

    /// Flip favorite membership. Returns the new membership state.
    pub fn toggle_favorite(&mut self, name: &str) -> bool {
        if self.is_favorite(name) {
            self.favorites.retain(|f| f != name);
            return false;
        }
        if !self.cities.iter().any(|c| c == name) {
            tracing::debug!("Ignoring favorite toggle for unknown city {:?}", name);
            return false;
        }
        self.favorites.push(name.to_string());
        true
    }

    /// Overwrite the weather text shown under `name`. Names no longer in the
    /// list are ignored. Returns true if the text was stored.
    pub fn set_city_weather(&mut self, name: &str, text: String) -> bool {
        if !self.cities.iter().any(|c| c == name) {
            tracing::debug!("Dropping weather for unlisted city {:?}", name);
            return false;
        }
        self.weather.insert(name.to_string(), text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_add_is_noop() {
        let mut list = CityList::new();
        assert!(!list.add_city(""));
        assert!(!list.add_city("   \t"));
        assert!(list.is_empty());
    }

    #[test]
    fn add_trims_and_keeps_duplicates() {
        let mut list = CityList::new();
        assert!(list.add_city("  Almaty "));
        assert!(list.add_city("Almaty"));
        assert_eq!(list.cities(), &["Almaty".to_string(), "Almaty".to_string()]);
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut list = CityList::new();
        list.add_city("Oslo");
        list.add_city("Rome");
        list.add_city("Oslo");
        assert!(list.remove_city("Oslo"));
        assert_eq!(list.cities(), &["Rome".to_string(), "Oslo".to_string()]);
        assert!(!list.remove_city("Paris"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn length_monotonic_under_add_and_remove() {
        let mut list = CityList::new();
        let mut prev = list.len();
        for name in ["a", " ", "b", "a", ""] {
            list.add_city(name);
            assert!(list.len() >= prev);
            prev = list.len();
        }
        for name in ["a", "zzz", "b", "a", "a"] {
            list.remove_city(name);
            assert!(list.len() <= prev);
            prev = list.len();
        }
        assert!(list.is_empty());
    }

    #[test]
    fn toggle_favorite_twice_restores() {
        let mut list = CityList::new();
        list.add_city("Tokyo");
        assert!(!list.is_favorite("Tokyo"));
        assert!(list.toggle_favorite("Tokyo"));
        assert!(list.is_favorite("Tokyo"));
        assert!(!list.toggle_favorite("Tokyo"));
        assert!(!list.is_favorite("Tokyo"));
    }

    #[test]
    fn favorite_requires_city() {
        let mut list = CityList::new();
        assert!(!list.toggle_favorite("Nowhere"));
        assert!(list.favorites().is_empty());
    }

    #[test]
    fn removing_last_occurrence_cascades() {
        let mut list = CityList::new();
        list.add_city("Lima");
        list.add_city("Lima");
        list.toggle_favorite("Lima");
        list.set_city_weather("Lima", "18.0°C".into());

        list.remove_city("Lima");
        assert!(list.is_favorite("Lima"));
        assert_eq!(list.weather_for("Lima"), Some("18.0°C"));

        list.remove_city("Lima");
        assert!(!list.is_favorite("Lima"));
        assert_eq!(list.weather_for("Lima"), None);
    }

    #[test]
    fn city_weather_overwrites() {
        let mut list = CityList::new();
        list.add_city("Cairo");
        list.set_city_weather("Cairo", "30.0°C".into());
        list.set_city_weather("Cairo", "Error: timeout".into());
        assert_eq!(list.weather_for("Cairo"), Some("Error: timeout"));
    }

    #[test]
    fn weather_for_unlisted_city_is_dropped() {
        let mut list = CityList::new();
        assert!(!list.set_city_weather("Reykjavik", "2.0°C".into()));
        assert_eq!(list.weather_for("Reykjavik"), None);

        list.add_city("Reykjavik");
        list.remove_city("Reykjavik");
        assert!(!list.set_city_weather("Reykjavik", "2.0°C".into()));

        list.add_city("Reykjavik");
        assert_eq!(list.weather_for("Reykjavik"), None);
    }
}
