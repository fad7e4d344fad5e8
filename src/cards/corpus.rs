use std::path::Path;

use crate::{
    cards::{Card, Rarity},
    Res,
};

/// Raw record shape of the prebuilt corpus file, one object per card.
#[derive(serde::Deserialize, Debug)]
struct RawCard {
    oracle_id: String,
    name: String,
    mana_cost: Option<String>,
    type_line: Option<String>,
    oracle_text: Option<String>,
    colors: Option<Vec<String>>,

    /// Rarity string: mythic, rare, uncommon, common, special, bonus.
    rarity: String,

    image: Option<String>,
}

impl RawCard {
    fn to_card(self) -> Option<Card> {
        // Double-faced names keep the front face only.
        let name = if self.name.contains("//") {
            self.name.split("//").next().unwrap().trim().to_string()
        } else {
            self.name
        };

        let rarity = Rarity::parse(&self.rarity)?;

        Some(Card::new(
            self.oracle_id,
            name,
            self.mana_cost.unwrap_or_default(),
            self.type_line.unwrap_or_default(),
            self.oracle_text.unwrap_or_default(),
            self.colors.unwrap_or_default(),
            rarity,
            self.image.unwrap_or_default(),
        ))
    }
}

/// Load the static card corpus from a JSON array on disk. Records with an
/// undraftable rarity are skipped rather than rejected; the corpus is read
/// once at startup and treated as immutable afterwards.
pub fn load_cards(path: &Path) -> Res<Vec<Card>> {
    tracing::debug!("Loading card corpus from {}.", path.display());

    let file = std::fs::File::open(path)?;
    let raw: Vec<RawCard> = serde_json::from_reader(std::io::BufReader::new(file))?;
    let total = raw.len();

    let cards: Vec<Card> = raw.into_iter().filter_map(RawCard::to_card).collect();
    if cards.len() < total {
        tracing::debug!(
            "Skipped {} corpus records with undraftable rarities.",
            total - cards.len()
        );
    }
    tracing::debug!("Loaded {} cards.", cards.len());

    Ok(cards)
}
