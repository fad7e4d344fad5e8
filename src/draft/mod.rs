use crate::{Error, Res};

pub mod booster;
pub mod pod;
pub mod sample;

/// Parameters for a draft session. Slot counts describe one booster; the foil
/// and mythic rates are contractual probabilities, not tuning knobs.
#[derive(Clone, Debug)]
pub struct DraftConfig {
    pub seats: usize,
    pub rounds: usize,

    /// Seat whose picks come from the caller; every other seat takes the
    /// first remaining card.
    pub human_seat: usize,

    pub mythic_rate: f64,
    pub foil_rate: f64,
    pub rares: usize,
    pub uncommons: usize,
    pub commons: usize,
    pub lands: usize,
}

impl Default for DraftConfig {
    fn default() -> Self {
        DraftConfig {
            seats: 8,
            rounds: 3,
            human_seat: 0,
            mythic_rate: 0.125,
            foil_rate: 0.125,
            rares: 1,
            uncommons: 3,
            commons: 10,
            lands: 1,
        }
    }
}

impl DraftConfig {
    /// Reject unusable configurations up front; `advance` never validates.
    pub fn validate(&self) -> Res<()> {
        if self.seats < 2 {
            return Err(Error::Config(format!(
                "need at least 2 seats, got {}",
                self.seats
            )));
        }
        if self.rounds < 1 {
            return Err(Error::Config("need at least 1 round".to_string()));
        }
        if self.human_seat >= self.seats {
            return Err(Error::Config(format!(
                "human seat {} out of range for {} seats",
                self.human_seat, self.seats
            )));
        }
        Ok(())
    }

    /// Cards in a full booster.
    pub fn cards_per_pack(&self) -> usize {
        self.rares + self.uncommons + self.commons + self.lands
    }
}
