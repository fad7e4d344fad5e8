use uuid::Uuid;

pub mod corpus;

/// Process-unique identifier for a drafted copy of a card.
pub type CardId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Mythic,
    Rare,
    Uncommon,
    Common,
}

impl Rarity {
    /// Parse a corpus rarity string. Anything outside the four draftable
    /// rarities (e.g. "special", "bonus") maps to `None` and the card is
    /// excluded from every bucket.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mythic" => Some(Rarity::Mythic),
            "rare" => Some(Rarity::Rare),
            "uncommon" => Some(Rarity::Uncommon),
            "common" => Some(Rarity::Common),
            _ => None,
        }
    }
}

/// Immutable card record from the static corpus. Never mutated after load.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Card {
    oracle_id: String,
    name: String,
    #[serde(default)]
    mana_cost: String,
    #[serde(default)]
    type_line: String,
    #[serde(default)]
    oracle_text: String,
    #[serde(default)]
    colors: Vec<String>,
    pub rarity: Rarity,
    #[serde(default)]
    image: String,
}

impl Card {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        oracle_id: String,
        name: String,
        mana_cost: String,
        type_line: String,
        oracle_text: String,
        colors: Vec<String>,
        rarity: Rarity,
        image: String,
    ) -> Self {
        Self {
            oracle_id,
            name,
            mana_cost,
            type_line,
            oracle_text,
            colors,
            rarity,
            image,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oracle_id(&self) -> &str {
        &self.oracle_id
    }

    pub fn type_line(&self) -> &str {
        &self.type_line
    }

    /// Basic lands occupy their own booster slot despite being printed at
    /// common.
    pub fn is_basic_land(&self) -> bool {
        self.rarity == Rarity::Common && self.type_line.to_ascii_lowercase().contains("basic land")
    }

    #[cfg(test)]
    pub fn sample(rarity: Rarity) -> Self {
        static ID: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(1);

        let id = ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Self {
            oracle_id: format!("oracle-{id}"),
            name: format!("Card {id}"),
            mana_cost: "{2}{U}".to_string(),
            type_line: "Creature — Test".to_string(),
            oracle_text: format!("Text for test card {id}."),
            colors: vec!["U".to_string()],
            rarity,
            image: format!("https://example.com/card-{id}-art.jpg"),
        }
    }

    #[cfg(test)]
    pub fn sample_land() -> Self {
        let mut card = Self::sample(Rarity::Common);
        card.type_line = "Basic Land — Island".to_string();
        card
    }
}

/// A card that has actually been drafted. Two copies may wrap identical
/// records; identity is by `uid` alone, assigned when the pod deals the card
/// into a seat's pile.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CardCopy {
    pub uid: CardId,
    #[serde(flatten)]
    pub card: Card,
}

impl CardCopy {
    pub fn mint(card: Card) -> Self {
        Self {
            uid: Uuid::new_v4(),
            card,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Card, CardCopy, Rarity};

    #[test]
    fn test_rarity_parse() {
        assert_eq!(Rarity::parse("mythic"), Some(Rarity::Mythic));
        assert_eq!(Rarity::parse("common"), Some(Rarity::Common));
        assert_eq!(Rarity::parse("special"), None);
        assert_eq!(Rarity::parse("bonus"), None);
        assert_eq!(Rarity::parse(""), None);
    }

    #[test]
    fn test_basic_land_detection() {
        assert!(Card::sample_land().is_basic_land());
        assert!(!Card::sample(Rarity::Common).is_basic_land());

        // Rarity must be common for the land slot.
        let mut card = Card::sample(Rarity::Rare);
        card.type_line = "Basic Land — Mountain".to_string();
        assert!(!card.is_basic_land());
    }

    #[test]
    fn test_copies_are_distinct() {
        let card = Card::sample(Rarity::Uncommon);
        let a = CardCopy::mint(card.clone());
        let b = CardCopy::mint(card);
        assert_ne!(a.uid, b.uid);
        assert_eq!(a.card.name(), b.card.name());
    }

    #[test]
    fn test_copy_serde_shape() {
        let copy = CardCopy::mint(Card::sample(Rarity::Rare));
        let value = serde_json::to_value(&copy).unwrap();
        // Flattened record plus uid, matching the persisted pool shape.
        assert!(value.get("uid").is_some());
        assert!(value.get("name").is_some());
        assert!(value.get("card").is_none());

        let back: CardCopy = serde_json::from_value(value).unwrap();
        assert_eq!(back.uid, copy.uid);
    }
}
