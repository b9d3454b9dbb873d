//! System instruction and suggested questions
//!
//! The system instruction embeds a short blurb about the venue, picked by
//! keyword-matching its name against an ordered table (first match wins).

use crate::catalog::{display_name, Category};

/// A keyword rule that selects a contextual blurb
#[derive(Debug, Clone, Copy)]
pub struct BlurbRule {
    /// Category the rule applies to
    pub category: Category,
    /// Any of these substrings in the lowercased venue name matches
    pub keywords: &'static [&'static str],
    /// Blurb used on match
    pub blurb: &'static str,
}

/// Ordered blurb rules; evaluated top to bottom
pub const BLURB_RULES: &[BlurbRule] = &[
    BlurbRule {
        category: Category::Food,
        keywords: &["starbucks", "coffee", "kopi"],
        blurb: "Coffee shop yang cozy dengan WiFi kenceng. Perfect buat WFC, meeting, atau ngobrol santai. Menu signature coffee-nya recommended banget.",
    },
    BlurbRule {
        category: Category::Food,
        keywords: &["mie", "bakmi", "noodle"],
        blurb: "Tempat mie dengan kuah yang rich dan topping yang generous. Comfort food terbaik di area ini dengan harga yang reasonable.",
    },
    BlurbRule {
        category: Category::Food,
        keywords: &["sate", "satay"],
        blurb: "Sate dengan bumbu kacang yang authentic dan daging yang tender. Local favorite yang selalu ramai, especially weekend.",
    },
    BlurbRule {
        category: Category::Food,
        keywords: &["pizza", "italian"],
        blurb: "Italian food dengan authentic taste. Pizza thin crust-nya crispy, pasta-nya al dente. Vibes casual dining yang cozy.",
    },
    BlurbRule {
        category: Category::Food,
        keywords: &["kfc", "mcd", "burger"],
        blurb: "Fast food chain dengan consistent quality. Quick bite yang reliable, perfect buat makan bareng keluarga atau temen.",
    },
    BlurbRule {
        category: Category::Food,
        keywords: &["sushi", "japanese"],
        blurb: "Japanese restaurant dengan fresh ingredients. Sushi grade-nya bagus, vibes authentic Japan banget.",
    },
    BlurbRule {
        category: Category::Food,
        keywords: &["padang", "warteg"],
        blurb: "Masakan Indonesia dengan cita rasa authentic. Bumbu-bumbunya rich, porsi mengenyangkan dengan harga bersahabat.",
    },
    BlurbRule {
        category: Category::Place,
        keywords: &["mall", "plaza"],
        blurb: "Shopping mall dengan complete facilities. Ada cinema, food court, brand stores. Perfect weekend destination buat family atau hangout.",
    },
    BlurbRule {
        category: Category::Place,
        keywords: &["taman", "park"],
        blurb: "Outdoor space yang fresh dan Instagram-worthy. Perfect buat morning jog, family picnic, atau sekedar refreshing dari rutinitas.",
    },
    BlurbRule {
        category: Category::Place,
        keywords: &["museum", "galeri"],
        blurb: "Cultural spot dengan educational value. Great buat expand knowledge sambil enjoy art atau history exhibition.",
    },
    BlurbRule {
        category: Category::Place,
        keywords: &["beach", "pantai"],
        blurb: "Beach destination dengan scenic view. Perfect buat sunset vibes, water activities, atau sekedar relax sambil dengerin ombak.",
    },
    BlurbRule {
        category: Category::Place,
        keywords: &["cafe", "resto"],
        blurb: "Dining place dengan cozy ambiance. Menu-nya diverse, perfect buat date night, family dinner, atau business meeting.",
    },
];

const DEFAULT_FOOD_BLURB: &str = "Local dining spot dengan menu signature yang unik. Popular choice di kalangan foodies area ini dengan reasonable price range.";

const DEFAULT_PLACE_BLURB: &str = "Popular destination dengan unique attractions dan facilities yang menarik. Worth visiting spot di area ini.";

/// Picks the contextual blurb for a venue
///
/// # Examples
///
/// ```
/// use dadu::catalog::Category;
/// use dadu::chat::prompts::context_blurb;
///
/// assert!(context_blurb("Sushi Tei (Summarecon Mall Bekasi)", Category::Food).contains("Japanese"));
/// ```
pub fn context_blurb(result: &str, category: Category) -> &'static str {
    // the "(area)" suffix is ignored, so "Sushi Tei (Summarecon Mall)" is not a mall
    let name = display_name(result).to_lowercase();

    BLURB_RULES
        .iter()
        .filter(|rule| rule.category == category)
        .find(|rule| rule.keywords.iter().any(|k| name.contains(k)))
        .map(|rule| rule.blurb)
        .unwrap_or(match category {
            Category::Food => DEFAULT_FOOD_BLURB,
            Category::Place => DEFAULT_PLACE_BLURB,
        })
}

/// Builds the system instruction for a venue
pub fn system_prompt(result: &str, category: Category) -> String {
    let place = match category {
        Category::Food => "tempat makan",
        Category::Place => "tempat",
    };
    let context = context_blurb(result, category);

    format!(
        r#"Kamu adalah AI assistant yang gaul dan friendly bernama dnAI, pakai bahasa anak Bekasi/Jaksel yang santai tapi informatif.
Kamu lagi bantuin user yang baru dapet hasil random: "{result}" ({place}) di area Bekasi/Bintaro.

Personality & Style:
- Pakai bahasa gaul yang natural: "wah bro", "bestie", "sabi banget", "kuy", "literally", "vibes-nya", "worth it", "no cap"
- Emosi dan antusias tapi tetap helpful dan informatif
- Kasih info yang akurat dan berguna tentang tempat/makanan
- Inget konteks percakapan sebelumnya dalam chat ini
- Jawaban 2-4 kalimat, padat berisi tapi engaging
- Sesekali pake emoji yang relevan (tapi jangan berlebihan)

Context info tentang {result}:
{context}

Guidelines:
- Selalu refer ke {result} dengan nama aslinya
- Kasih insight yang specific dan actionable
- Kalo ditanya hal teknis (harga, jam buka, dll), kasih estimasi reasonable
- Maintain consistency dengan previous responses dalam chat ini
- Be enthusiastic but authentic

Jawab pertanyaan user dengan gaya yang asyik dan kasih value yang real!"#
    )
}

const FOOD_PROMPTS: [&str; 12] = [
    "Kenapa harus ke {name}?",
    "Menu apa yang recommended di {name}?",
    "Budget berapa buat makan di {name}?",
    "Vibes {name} gimana sih?",
    "Worth it gak sih {name}?",
    "Jam buka {name} kapan aja?",
    "Parking di {name} gimana?",
    "{name} ramai gak sih?",
    "Ada delivery gak di {name}?",
    "{name} halal gak?",
    "{name} cocok buat date gak?",
    "Menu vegetarian di {name} ada gak?",
];

const PLACE_PROMPTS: [&str; 12] = [
    "Kenapa harus ke {name}?",
    "Aktivitas apa yang seru di {name}?",
    "Best time buat ke {name} kapan?",
    "{name} ramai gak sih?",
    "Budget berapa buat ke {name}?",
    "Fasilitas apa aja yang ada di {name}?",
    "Akses ke {name} gimana?",
    "{name} cocok buat family gak?",
    "{name} Instagrammable gak?",
    "Parking di {name} susah gak?",
    "{name} buka sampai jam berapa?",
    "Ada promo gak di {name}?",
];

/// The 12 suggested questions for a venue
///
/// # Examples
///
/// ```
/// use dadu::catalog::Category;
/// use dadu::chat::prompts::suggested_prompts;
///
/// let prompts = suggested_prompts("Monas (Monumen Nasional)", Category::Place);
/// assert_eq!(prompts.len(), 12);
/// assert_eq!(prompts[0], "Kenapa harus ke Monas?");
/// ```
pub fn suggested_prompts(result: &str, category: Category) -> Vec<String> {
    let name = display_name(result);
    let templates = match category {
        Category::Food => &FOOD_PROMPTS,
        Category::Place => &PLACE_PROMPTS,
    };

    templates
        .iter()
        .map(|template| template.replace("{name}", name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_blurbs_match_keywords() {
        assert!(context_blurb("Kopi Kenangan (Bekasi)", Category::Food).starts_with("Coffee shop"));
        assert!(context_blurb("Bakmi GM", Category::Food).starts_with("Tempat mie"));
        assert!(context_blurb("Sate Khas Senayan", Category::Food).starts_with("Sate"));
        assert!(context_blurb("KFC", Category::Food).starts_with("Fast food"));
        assert!(context_blurb("Warteg Kharisma Bahari", Category::Food).starts_with("Masakan Indonesia"));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "kopi" appears before "mie" in the table
        assert!(context_blurb("Kopi Mie Corner", Category::Food).starts_with("Coffee shop"));
    }

    #[test]
    fn test_area_suffix_is_ignored() {
        assert_eq!(
            context_blurb("Hokben (Bekasi Mall)", Category::Food),
            DEFAULT_FOOD_BLURB
        );
    }

    #[test]
    fn test_place_blurbs_and_default() {
        assert!(context_blurb("Pondok Indah Mall", Category::Place).starts_with("Shopping mall"));
        assert!(context_blurb("Taman Suropati", Category::Place).starts_with("Outdoor"));
        assert!(context_blurb("Museum Nasional Indonesia", Category::Place).starts_with("Cultural"));
        assert!(context_blurb("Pantai Ancol", Category::Place).starts_with("Beach"));
        assert_eq!(context_blurb("Kepulauan Seribu", Category::Place), DEFAULT_PLACE_BLURB);
    }

    #[test]
    fn test_rules_only_apply_to_their_category() {
        // "park" is a place keyword, not a food one
        assert_eq!(
            context_blurb("Park Bistro", Category::Food),
            DEFAULT_FOOD_BLURB
        );
    }

    #[test]
    fn test_system_prompt_mentions_venue_and_blurb() {
        let prompt = system_prompt("Sushi Tei (Summarecon Mall Bekasi)", Category::Food);
        assert!(prompt.contains("\"Sushi Tei (Summarecon Mall Bekasi)\" (tempat makan)"));
        assert!(prompt.contains("Japanese restaurant"));

        let prompt = system_prompt("Monas", Category::Place);
        assert!(prompt.contains("\"Monas\" (tempat)"));
    }

    #[test]
    fn test_suggested_prompts_differ_per_category() {
        let food = suggested_prompts("Warung Nasi (Bekasi)", Category::Food);
        let place = suggested_prompts("Warung Nasi (Bekasi)", Category::Place);

        assert_eq!(food.len(), 12);
        assert_eq!(place.len(), 12);
        assert_eq!(food[1], "Menu apa yang recommended di Warung Nasi?");
        assert_eq!(place[1], "Aktivitas apa yang seru di Warung Nasi?");
        assert!(food.iter().all(|p| p.contains("Warung Nasi") && !p.contains("Bekasi")));
    }
}
