//! Offline fallback replies
//!
//! Used whenever the completion service is not configured or fails. Rules
//! are evaluated in order against the lowercased question and the first
//! match wins; `{name}` in a template is replaced with the venue name.

use crate::catalog::{display_name, Category};

/// A keyword rule with its reply templates
#[derive(Debug, Clone, Copy)]
pub struct FallbackRule {
    /// Any of these substrings in the lowercased question matches
    pub keywords: &'static [&'static str],
    /// Reply for food venues, and for places when `place` is `None`
    pub food: &'static str,
    /// Reply for places, if it differs
    pub place: Option<&'static str>,
}

impl FallbackRule {
    fn matches(&self, question: &str) -> bool {
        self.keywords.iter().any(|keyword| question.contains(keyword))
    }

    fn template(&self, category: Category) -> &'static str {
        match category {
            Category::Food => self.food,
            Category::Place => self.place.unwrap_or(self.food),
        }
    }
}

/// Ordered fallback rules
pub const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        keywords: &["kenapa", "why", "knp"],
        food: "Wah {name} pilihan yang solid banget bestie! 🔥 Tempatnya cozy, makanannya consistently enak, dan vibes-nya literally perfect buat nongkrong. Plus review-nya bagus-bagus semua, no cap!",
        place: Some("{name} itu hidden gem yang worth banget dikunjungi bro! ✨ Vibes-nya keren, fasilitasnya lengkap, dan spot-nya Instagram-worthy. Definitely gonna be memorable experience!"),
    },
    FallbackRule {
        keywords: &["enak", "menu", "recommend"],
        food: "Menu signature {name} pasti yang paling recommended! 😋 Coba tanya server langsung aja bestie, mereka pasti kasih tau best seller dan hidden menu yang enak banget.",
        place: None,
    },
    FallbackRule {
        keywords: &["budget", "harga", "mahal", "price"],
        food: "Budget 50-150k per orang udah sufficient kok di {name}! 💸 Tergantung mau order apa aja sih literally. Kalo mau hemat, coba menu paket atau promo weekday.",
        place: Some("Entry fee {name} generally affordable kok bestie! 🎫 Sekitar 25-75k per orang depending on activities yang mau dicoba. Worth every rupiah deh!"),
    },
    FallbackRule {
        keywords: &["lokasi", "alamat", "dimana", "address"],
        food: "Lokasi {name} gampang dijangkau kok bro! 📍 Akses transportasi umum juga ada. Tinggal search di Google Maps pasti ketemu, atau grab aja sekalian kalo males ribet.",
        place: None,
    },
    FallbackRule {
        keywords: &["jam", "buka", "tutup", "hours"],
        food: "{name} biasanya buka dari pagi sampai malem kok bestie! ⏰ Sekitar 9 AM - 10 PM, tapi better cek di Google atau telpon dulu buat pastiin, especially kalo weekend atau hari libur.",
        place: None,
    },
    FallbackRule {
        keywords: &["ramai", "crowded", "sepi"],
        food: "{name} lumayan happening sih, especially weekend! 👥 Kalo mau lebih santai, try dateng weekday atau pas jam-jam sepi. But honestly, vibes ramai juga seru kok!",
        place: None,
    },
    FallbackRule {
        keywords: &["parking", "parkir"],
        food: "Parking di {name} available kok bestie! 🚗 Ada basement atau outdoor parking, tapi kalo weekend agak challenging nyari spot. Consider naik grab atau public transport aja.",
        place: None,
    },
    FallbackRule {
        keywords: &["wifi", "internet"],
        food: "WiFi di {name} speed-nya decent kok buat browsing atau WFC! 📶 Password biasanya ditempel atau tanya ke staff. Connection-nya stable, perfect buat zoom meeting juga.",
        place: None,
    },
    FallbackRule {
        keywords: &["delivery", "takeaway", "pesan"],
        food: "{name} ada layanan delivery via GoFood/GrabFood kok bro! 🛵 Kalo dine-in penuh, bisa takeaway juga. Order online lebih praktis dan sering ada promo-promo menarik.",
        place: None,
    },
    FallbackRule {
        keywords: &["couple", "date", "romantic"],
        food: "{name} vibes-nya romantic banget buat date night! 💕 Ambience-nya cozy, lighting-nya dim, perfect buat quality time sama pasangan. Recommended banget bestie!",
        place: None,
    },
    FallbackRule {
        keywords: &["family", "anak", "kids"],
        food: "{name} family-friendly kok! 👨‍👩‍👧‍👦 Ada kids menu, high chair tersedia, dan staff-nya patient sama anak-anak. Perfect buat family gathering atau weekend makan bareng.",
        place: Some("{name} family-friendly banget kok! 👨‍👩‍👧‍👦 Area-nya luas, aman buat anak-anak, dan banyak spot buat istirahat. Perfect buat quality time bareng keluarga."),
    },
    FallbackRule {
        keywords: &["halal", "pork", "muslim"],
        food: "{name} halal certified kok bestie, jadi aman! ✅ Ga ada pork atau alcohol di menu mereka. Muslim-friendly banget, so no worries about dietary restrictions.",
        place: None,
    },
    FallbackRule {
        keywords: &["vegan", "vegetarian", "healthy"],
        food: "{name} punya vegetarian/vegan options juga kok! 🥗 Menu healthy-nya cukup beragam, perfect buat yang lagi diet atau lifestyle conscious. Fresh ingredients guaranteed!",
        place: None,
    },
    FallbackRule {
        keywords: &["instagrammable", "foto", "selfie"],
        food: "{name} spot-nya totally Instagrammable! 📸 Interior designnya aesthetic banget, lighting-nya perfect buat foto. Dijamin feed Instagram kamu bakal kece abis!",
        place: None,
    },
    FallbackRule {
        keywords: &["promo", "diskon", "discount", "voucher"],
        food: "{name} sering ada promo kok bestie! 🏷️ Cek aplikasi ojol atau Instagram mereka, biasanya ada diskon weekday atau bundling yang lumayan banget.",
        place: Some("{name} kadang ada promo tiket atau event diskon kok! 🏷️ Pantau Instagram resminya atau aplikasi travel, lumayan buat hemat budget jalan-jalan."),
    },
    FallbackRule {
        keywords: &["reservasi", "reservation", "booking", "book"],
        food: "Buat {name}, reservasi recommended banget kalo dateng rame-rame atau pas weekend! 📅 Telpon atau DM dulu aja biar ga waiting list kelamaan.",
        place: Some("{name} biasanya bisa langsung dateng kok, tapi buat event atau wahana tertentu better booking online dulu! 📅 Antrian weekend bisa panjang banget."),
    },
    FallbackRule {
        keywords: &["bayar", "payment", "qris", "cash", "debit"],
        food: "{name} udah terima QRIS, debit, sama e-wallet kok bro! 💳 Tapi sedia cash dikit juga gapapa buat jaga-jaga.",
        place: None,
    },
    FallbackRule {
        keywords: &["aktivitas", "activity", "ngapain", "seru"],
        food: "Di {name} kamu bisa kulineran sambil nongkrong lama, literally betah! 🍽️ Cobain beberapa menu bareng temen biar bisa sharing.",
        place: Some("Di {name} banyak yang bisa dilakuin bestie! 🎡 Jalan-jalan santai, foto-foto, kulineran, sampe window shopping. Seharian juga ga bakal bosen!"),
    },
    FallbackRule {
        keywords: &["fasilitas", "facility", "facilities", "toilet", "mushola"],
        food: "Fasilitas {name} cukup lengkap kok! 🚻 Ada toilet bersih, mushola di sekitar area, dan tempat duduk yang nyaman buat nongkrong.",
        place: Some("{name} fasilitasnya lengkap bro! 🚻 Toilet, mushola, area istirahat, sampe food court ada semua. Nyaman buat seharian di sana."),
    },
    FallbackRule {
        keywords: &["akses", "transport", "krl", "busway", "macet"],
        food: "Akses ke {name} lumayan gampang kok! 🚆 Bisa naik KRL atau TransJakarta terus lanjut ojol. Kalo bawa kendaraan, hindari jam pulang kantor biar ga kena macet.",
        place: None,
    },
    FallbackRule {
        keywords: &["best time", "kapan", "waktu terbaik"],
        food: "Waktu terbaik ke {name} itu weekday sore atau pas jam makan siang lewat dikit! ⏱️ Lebih sepi, pelayanan juga lebih cepet.",
        place: Some("Best time ke {name} itu weekday pagi atau sore menjelang sunset bestie! 🌅 Lebih adem, ga terlalu rame, dan foto-fotonya dapet golden hour."),
    },
    FallbackRule {
        keywords: &["worth", "layak"],
        food: "{name} worth it banget sih menurut aku! 💯 Rasa sama harganya balance, porsinya juga pas. No cap, kamu ga bakal nyesel.",
        place: Some("{name} definitely worth it bro! 💯 Experience-nya beda, dan banyak hal yang bisa dinikmatin buat harga segitu."),
    },
    FallbackRule {
        keywords: &["vibes", "suasana", "ambience", "ambiance"],
        food: "Vibes {name} tuh cozy dan welcoming banget! ✨ Cocok buat ngobrol lama, musik-nya juga enak didenger.",
        place: Some("Vibes {name} seru dan lively banget bestie! ✨ Rame tapi tetep nyaman, cocok buat refreshing dari rutinitas."),
    },
    FallbackRule {
        keywords: &["pet", "anjing", "kucing", "hewan"],
        food: "Soal pet-friendly, {name} beda-beda per outlet bro! 🐾 Biasanya outdoor area boleh bawa hewan, tapi better tanya staff dulu ya.",
        place: None,
    },
];

const DEFAULT_REPLY: &str = "Hmm interesting question tentang {name} nih bestie! 🤔 Basically ini pilihan yang solid banget dan pasti bakal jadi experience yang memorable. Kamu definitely gonna love it!";

/// Builds the offline reply for a question about a venue
///
/// Deterministic for a given question, venue and category.
///
/// # Examples
///
/// ```
/// use dadu::catalog::Category;
/// use dadu::chat::fallback::fallback_reply;
///
/// let reply = fallback_reply("Berapa harga di sana?", "Bakmi GM (Bekasi)", Category::Food);
/// assert!(reply.contains("Bakmi GM"));
/// assert!(reply.contains("50-150k"));
/// ```
pub fn fallback_reply(question: &str, result: &str, category: Category) -> String {
    let question = question.to_lowercase();
    let name = display_name(result);

    FALLBACK_RULES
        .iter()
        .find(|rule| rule.matches(&question))
        .map(|rule| rule.template(category))
        .unwrap_or(DEFAULT_REPLY)
        .replace("{name}", name)
}
