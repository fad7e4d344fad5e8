use std::fmt::Debug;
use std::sync::Arc;

use crate::{
    cards::{Card, Rarity},
    draft::{sample::sample, DraftConfig},
    random::RandomSource,
};

pub type Pack = Vec<Card>;

/// Anything that can produce boosters for a pod. The generator is the real
/// implementation; tests drive the pod with scripted sources instead.
pub trait PackSource {
    fn next_pack(&mut self) -> Pack;
}

/// The corpus partitioned by rarity, built once at startup and read-only
/// afterwards. Basic lands are split out of the common bucket because they
/// occupy their own booster slot. Cards with undraftable rarities never reach
/// this type (filtered at corpus load).
#[derive(Clone)]
pub struct RarityIndex {
    land: Vec<Card>,
    common: Vec<Card>,
    uncommon: Vec<Card>,
    rare: Vec<Card>,
    mythic: Vec<Card>,
}

impl RarityIndex {
    pub fn build(cards: &[Card]) -> Self {
        let mut index = Self {
            land: Vec::new(),
            common: Vec::new(),
            uncommon: Vec::new(),
            rare: Vec::new(),
            mythic: Vec::new(),
        };
        for card in cards {
            match card.rarity {
                Rarity::Common if card.is_basic_land() => index.land.push(card.clone()),
                Rarity::Common => index.common.push(card.clone()),
                Rarity::Uncommon => index.uncommon.push(card.clone()),
                Rarity::Rare => index.rare.push(card.clone()),
                Rarity::Mythic => index.mythic.push(card.clone()),
            }
        }
        index
    }

    pub fn lands(&self) -> &[Card] {
        &self.land
    }

    fn cards_of(&self, rarity: Rarity) -> &[Card] {
        match rarity {
            Rarity::Mythic => &self.mythic,
            Rarity::Rare => &self.rare,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Common => &self.common,
        }
    }

    pub fn size(&self) -> usize {
        self.land.len()
            + self.common.len()
            + self.uncommon.len()
            + self.rare.len()
            + self.mythic.len()
    }
}

impl Debug for RarityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RarityIndex {{ lands: {}, commons: {}, uncommons: {}, rares: {}, mythics: {} }}",
            self.land.len(),
            self.common.len(),
            self.uncommon.len(),
            self.rare.len(),
            self.mythic.len()
        )
    }
}

/// Cumulative thresholds for the foil rarity roll.
fn roll_foil_rarity(rng: &mut dyn RandomSource) -> Rarity {
    let r = rng.next_unit();
    if r < 0.077 {
        Rarity::Mythic
    } else if r < 0.231 {
        Rarity::Rare
    } else if r < 0.539 {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

/// Produces independent boosters from a shared rarity index. Stateless
/// between calls apart from the random source.
pub struct BoosterGenerator {
    index: Arc<RarityIndex>,
    config: DraftConfig,
    rng: Box<dyn RandomSource>,
}

impl BoosterGenerator {
    pub fn new(index: Arc<RarityIndex>, config: &DraftConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            index,
            config: config.clone(),
            rng,
        }
    }

    /// Generate one booster: rare slot (mythic upgrade roll), uncommons,
    /// commons (possibly foil-substituted), land. Empty buckets shorten the
    /// pack instead of erroring, so a degenerate corpus still drafts.
    pub fn generate(&mut self) -> Pack {
        let rng = self.rng.as_mut();
        let mut pack = Vec::with_capacity(self.config.cards_per_pack());

        for _ in 0..self.config.rares {
            let bucket = if rng.next_unit() < self.config.mythic_rate {
                self.index.cards_of(Rarity::Mythic)
            } else {
                self.index.cards_of(Rarity::Rare)
            };
            pack.extend(sample(rng, bucket, 1));
        }

        let uncommons = sample(
            rng,
            self.index.cards_of(Rarity::Uncommon),
            self.config.uncommons,
        );
        let mut commons = sample(
            rng,
            self.index.cards_of(Rarity::Common),
            self.config.commons,
        );
        let lands = sample(rng, self.index.lands(), self.config.lands);

        if rng.next_unit() < self.config.foil_rate {
            let bucket = self.index.cards_of(roll_foil_rarity(rng));
            // The last common slot is never replaced; the foil lands on a
            // uniform index among the first n - 1 commons. With fewer than
            // two commons there is no eligible slot and the roll is wasted.
            if commons.len() >= 2 && !bucket.is_empty() {
                if let Some(foil) = sample(rng, bucket, 1).pop() {
                    let at = rng.pick_index(commons.len() - 1);
                    commons[at] = foil;
                }
            }
        }

        pack.extend(uncommons);
        pack.extend(commons);
        pack.extend(lands);
        pack
    }
}

impl PackSource for BoosterGenerator {
    fn next_pack(&mut self) -> Pack {
        self.generate()
    }
}
