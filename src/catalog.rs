//! Venue catalog
//!
//! Static, read-only venue lists the dice draws from, plus the restricted
//! "secret" set used when secret mode is on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user is deciding on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Where to eat
    Food,
    /// Where to go
    Place,
}

impl Category {
    /// Parse a category from a string ("food" or "place", case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use dadu::catalog::Category;
    ///
    /// assert_eq!(Category::parse_str("Place").unwrap(), Category::Place);
    /// assert!(Category::parse_str("drink").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "place" => Ok(Self::Place),
            other => Err(format!("Unknown category: {}", other)),
        }
    }

    /// The question shown on the category button
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Makan Apa?",
            Self::Place => "Kemana Ya?",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Place => write!(f, "place"),
        }
    }
}

/// The candidate set a single roll draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidates<'a> {
    /// Uniform draw from the list
    Pick(&'a [&'static str]),
    /// A single fixed value, no randomness involved
    Fixed(&'static str),
}

impl Candidates<'_> {
    /// Number of possible outcomes
    pub fn len(&self) -> usize {
        match self {
            Self::Pick(options) => options.len(),
            Self::Fixed(_) => 1,
        }
    }

    /// True if nothing can be drawn
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `value` is a possible outcome
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Pick(options) => options.iter().any(|option| *option == value),
            Self::Fixed(fixed) => *fixed == value,
        }
    }
}

/// Read-only venue datasets
#[derive(Debug, Clone)]
pub struct VenueCatalog {
    food: Vec<&'static str>,
    place: Vec<&'static str>,
    secret_food: Vec<&'static str>,
    secret_place: &'static str,
}

impl VenueCatalog {
    /// Build a catalog from explicit lists
    pub fn new(
        food: Vec<&'static str>,
        place: Vec<&'static str>,
        secret_food: Vec<&'static str>,
        secret_place: &'static str,
    ) -> Self {
        Self {
            food,
            place,
            secret_food,
            secret_place,
        }
    }

    /// Venues for a category in normal mode
    pub fn venues(&self, category: Category) -> &[&'static str] {
        match category {
            Category::Food => &self.food,
            Category::Place => &self.place,
        }
    }

    /// Candidate set for a roll in the given mode
    ///
    /// # Examples
    ///
    /// ```
    /// use dadu::catalog::{Candidates, Category, VenueCatalog};
    ///
    /// let catalog = VenueCatalog::default();
    /// assert_eq!(
    ///     catalog.candidates(Category::Place, true),
    ///     Candidates::Fixed("Lagoon Avenue Bekasi")
    /// );
    /// assert_eq!(catalog.candidates(Category::Food, true).len(), 2);
    /// ```
    pub fn candidates(&self, category: Category, secret_mode: bool) -> Candidates<'_> {
        match (secret_mode, category) {
            (false, category) => Candidates::Pick(self.venues(category)),
            (true, Category::Food) => Candidates::Pick(&self.secret_food),
            (true, Category::Place) => Candidates::Fixed(self.secret_place),
        }
    }

    /// How many options the current mode draws from
    pub fn option_count(&self, category: Category, secret_mode: bool) -> usize {
        self.candidates(category, secret_mode).len()
    }
}

impl Default for VenueCatalog {
    fn default() -> Self {
        Self::new(
            FOOD_VENUES.to_vec(),
            PLACE_VENUES.to_vec(),
            SECRET_FOOD_VENUES.to_vec(),
            SECRET_PLACE,
        )
    }
}

/// Venue name without the trailing "(area)" qualifier
///
/// # Examples
///
/// ```
/// use dadu::catalog::display_name;
///
/// assert_eq!(display_name("Warung Nasi (Bekasi)"), "Warung Nasi");
/// assert_eq!(display_name("Monas"), "Monas");
/// ```
pub fn display_name(venue: &str) -> &str {
    venue.split('(').next().unwrap_or(venue).trim()
}

const SECRET_FOOD_VENUES: [&str; 2] = [
    "Solaria (Lagoon Avenue Bekasi)",
    "Burger King (Lagoon Avenue Bekasi)",
];

const SECRET_PLACE: &str = "Lagoon Avenue Bekasi";

const FOOD_VENUES: [&str; 40] = [
    "Starbucks (Summarecon Mall Bekasi)",
    "Kopi Kenangan (Grand Galaxy Park)",
    "Janji Jiwa (Bintaro Sektor 9)",
    "Bakmi GM (Metropolitan Mall Bekasi)",
    "Mie Gacoan (Bekasi Timur)",
    "Bakmi Naga (Bintaro Jaya Xchange)",
    "Mie Ayam Tumini (Bekasi)",
    "Sate Khas Senayan (Bekasi)",
    "Sate Maranggi Hj. Yetty (Bekasi)",
    "Sate Padang Ajo Ramon (Bintaro)",
    "Pizza Hut (Revo Town Bekasi)",
    "PHD Pizza (Bekasi Barat)",
    "Pizza Marzano (AEON Mall BSD)",
    "KFC (Bekasi Cyber Park)",
    "McDonald's (Jatiwaringin)",
    "Burger King (Summarecon Bekasi)",
    "Richeese Factory (Harapan Indah)",
    "Sushi Tei (Summarecon Mall Bekasi)",
    "Genki Sushi (Bintaro Jaya Xchange)",
    "Sushi Hiro (AEON Mall BSD)",
    "Marugame Udon (Grand Galaxy Park)",
    "Pepper Lunch (Metropolitan Mall Bekasi)",
    "Rumah Makan Padang Sederhana (Bekasi)",
    "Warteg Kharisma Bahari (Bekasi)",
    "Nasi Padang Pagi Sore (Bintaro)",
    "Soto Betawi H. Ma'ruf (Bekasi)",
    "Bebek Kaleyo (Bekasi)",
    "Ayam Geprek Bensu (Bekasi Timur)",
    "Nasi Uduk Kebon Kacang (Bekasi)",
    "Pecel Lele Lela (Bintaro)",
    "Warung Tekko (Summarecon Bekasi)",
    "Solaria (Blu Plaza Bekasi)",
    "Hokben (Bekasi Square)",
    "Yoshinoya (Living World Grand Wisata)",
    "Gokana Ramen (Bekasi)",
    "Kintan Buffet (AEON Mall BSD)",
    "Mujigae (Summarecon Mall Bekasi)",
    "Kedai Kopi Tuku (Bintaro)",
    "Bakso Boedjangan (Bekasi)",
    "Martabak Bangka Pecenongan 78 (Bekasi)",
];

const PLACE_VENUES: [&str; 50] = [
    "Summarecon Mall Bekasi",
    "Metropolitan Mall Bekasi",
    "Blu Plaza Bekasi",
    "Living World Grand Wisata",
    "Revo Town Bekasi",
    "Lagoon Avenue Bekasi",
    "Bekasi Cyber Park",
    "Alun-Alun Bekasi",
    "Taman Kota Bekasi",
    "Grand Galaxy Park (Bekasi)",
    "Bintaro Jaya Xchange Mall",
    "ITC Bintaro",
    "Bintaro Plaza",
    "AEON Mall BSD City",
    "The Breeze BSD City",
    "ICE BSD City",
    "Scientia Square Park",
    "Taman Jajan BSD",
    "Qbig BSD City",
    "Living World Alam Sutera",
    "Flavor Bliss Alam Sutera",
    "Mall @ Alam Sutera",
    "Serpong Town Square",
    "Summarecon Mall Serpong",
    "Pasar Modern BSD",
    "Teras Kota BSD",
    "Green Office Park BSD",
    "Taman Kota 2 BSD",
    "Trans Snow World Bekasi",
    "Downtown Walk Summarecon Bekasi",
    "Waterpark Hairos (Bekasi)",
    "Taman Buaya Jakarta Indonesia Jaya (Bekasi)",
    "Pantai Indah Kapuk (PIK)",
    "Ancol Dreamland",
    "Kota Tua Jakarta",
    "Taman Mini Indonesia Indah (TMII)",
    "Kebun Binatang Ragunan",
    "Museum Nasional Indonesia",
    "Taman Suropati",
    "Setu Babakan (Jakarta Selatan)",
    "Pantai Ancol",
    "Taman Impian Jaya Ancol",
    "Kepulauan Seribu",
    "Monas (Monumen Nasional)",
    "Pluit Village",
    "Mall Taman Anggrek",
    "Central Park Mall",
    "Pondok Indah Mall",
    "Senayan City",
    "Galeri Nasional Indonesia",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_and_display() {
        assert_eq!(Category::parse_str("food").unwrap(), Category::Food);
        assert_eq!(Category::parse_str(" PLACE ").unwrap(), Category::Place);
        assert!(Category::parse_str("").is_err());
        assert_eq!(Category::Food.to_string(), "food");
        assert_eq!(Category::Place.to_string(), "place");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Food).unwrap(), "\"food\"");
        let parsed: Category = serde_json::from_str("\"place\"").unwrap();
        assert_eq!(parsed, Category::Place);
        assert!(serde_json::from_str::<Category>("\"Food\"").is_err());
    }

    #[test]
    fn test_normal_mode_candidates_are_full_lists() {
        let catalog = VenueCatalog::default();
        assert_eq!(
            catalog.candidates(Category::Food, false),
            Candidates::Pick(&FOOD_VENUES)
        );
        assert_eq!(catalog.option_count(Category::Place, false), PLACE_VENUES.len());
    }

    #[test]
    fn test_secret_mode_candidates() {
        let catalog = VenueCatalog::default();
        let food = catalog.candidates(Category::Food, true);
        assert_eq!(food.len(), 2);
        assert!(food.contains("Solaria (Lagoon Avenue Bekasi)"));
        assert!(!food.contains("KFC (Bekasi Cyber Park)"));

        let place = catalog.candidates(Category::Place, true);
        assert_eq!(place, Candidates::Fixed("Lagoon Avenue Bekasi"));
        assert_eq!(place.len(), 1);
    }

    #[test]
    fn test_display_name_strips_area() {
        assert_eq!(display_name("Sushi Tei (Summarecon Mall Bekasi)"), "Sushi Tei");
        assert_eq!(display_name("Pantai Indah Kapuk (PIK)"), "Pantai Indah Kapuk");
        assert_eq!(display_name("  Senayan City "), "Senayan City");
    }

    #[test]
    fn test_venue_lists_have_no_duplicates() {
        for list in [&FOOD_VENUES[..], &PLACE_VENUES[..]] {
            let mut sorted = list.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), list.len());
        }
    }
}
