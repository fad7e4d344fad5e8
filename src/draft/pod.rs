use crate::{
    cards::CardCopy,
    draft::{
        booster::{Pack, PackSource},
        DraftConfig,
    },
    Error, Res,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum PassDirection {
    Left,
    Right,
}

impl PassDirection {
    /// Round 0 passes left, round 1 right, alternating.
    fn for_round(round: usize) -> Self {
        if round % 2 == 0 {
            PassDirection::Left
        } else {
            PassDirection::Right
        }
    }

    fn delta(self) -> isize {
        match self {
            PassDirection::Left => 1,
            PassDirection::Right => -1,
        }
    }
}

/// One draft session over a fixed table of seats. Each `advance` call resolves
/// a single whole-table tick: every seat holding a pack picks one card, packs
/// rotate, and the round rolls over once every pack is exhausted. Picked cards
/// are minted into `CardCopy` entities as they land in a seat's pile.
///
/// Single-writer: the pod is not designed for concurrent mutation.
pub struct Pod {
    config: DraftConfig,
    source: Box<dyn PackSource>,

    /// Drafted piles, append-only within a session.
    piles: Vec<Vec<CardCopy>>,

    /// Packs currently in front of each seat; `None` once a seat's pack has
    /// been passed away or exhausted.
    current_packs: Vec<Option<Pack>>,

    round: usize,
    pick: usize,
    direction: PassDirection,
}

impl Pod {
    /// Create a pod and deal the first round. Configuration problems are
    /// reported here, never from `advance`.
    pub fn new(config: DraftConfig, source: Box<dyn PackSource>) -> Res<Self> {
        config.validate()?;

        let seats = config.seats;
        let mut pod = Self {
            config,
            source,
            piles: vec![Vec::new(); seats],
            current_packs: vec![None; seats],
            round: 0,
            pick: 0,
            direction: PassDirection::Left,
        };
        pod.deal_round();
        Ok(pod)
    }

    /// Fresh boosters for every seat at the top of a round.
    fn deal_round(&mut self) {
        self.current_packs = (0..self.config.seats)
            .map(|_| Some(self.source.next_pack()))
            .collect();
        self.pick = 0;
        self.direction = PassDirection::for_round(self.round);
        tracing::debug!(
            "Dealt round {} ({} seats, passing {:?}).",
            self.round,
            self.config.seats,
            self.direction
        );
    }

    /// Resolve one pick step for the whole table. The human seat removes
    /// `user_pick` from its pack; every other seat takes the first remaining
    /// card. An out-of-range `user_pick` while the human seat holds a pack is
    /// rejected with `Error::Pick` and the pod is left untouched; if the
    /// human seat holds no pack (bot-only tail of a round) the index is
    /// ignored.
    pub fn advance(&mut self, user_pick: usize) -> Res<()> {
        if let Some(pack) = &self.current_packs[self.config.human_seat] {
            // An empty dealt pack (degenerate corpus) drafts like no pack.
            if !pack.is_empty() && user_pick >= pack.len() {
                return Err(Error::Pick {
                    index: user_pick,
                    len: pack.len(),
                });
            }
        }

        let seats = self.config.seats;
        let mut next_packs: Vec<Option<Pack>> = vec![None; seats];

        for seat in 0..seats {
            let Some(mut pack) = self.current_packs[seat].take() else {
                continue;
            };
            if pack.is_empty() {
                continue;
            }

            let choice = if seat == self.config.human_seat {
                user_pick
            } else {
                0
            };
            let card = pack.remove(choice);
            self.piles[seat].push(CardCopy::mint(card));

            if !pack.is_empty() {
                let target =
                    (seat as isize + self.direction.delta()).rem_euclid(seats as isize) as usize;
                next_packs[target] = Some(pack);
            }
        }

        self.current_packs = next_packs;
        self.pick += 1;

        if self.current_packs.iter().all(Option::is_none) {
            self.round += 1;
            if self.round < self.config.rounds {
                self.deal_round();
            } else {
                tracing::debug!("Draft complete after {} rounds.", self.round);
            }
        }

        Ok(())
    }

    /// True once the final round has been drafted out.
    pub fn is_done(&self) -> bool {
        self.round >= self.config.rounds
    }

    pub fn seats(&self) -> usize {
        self.config.seats
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn pick(&self) -> usize {
        self.pick
    }

    /// The pack currently in front of this seat, if any.
    pub fn current_pack(&self, seat: usize) -> Option<&Pack> {
        self.current_packs.get(seat).and_then(Option::as_ref)
    }

    /// Cards drafted by this seat so far.
    pub fn pile(&self, seat: usize) -> &[CardCopy] {
        &self.piles[seat]
    }

    /// Consume the pod into its per-seat pools for deck building.
    pub fn into_pools(self) -> Vec<Vec<CardCopy>> {
        self.piles
    }
}
