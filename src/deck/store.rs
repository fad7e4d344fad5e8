use std::collections::HashMap;

use crate::{
    cards::{CardCopy, CardId},
    deck::list::DeckList,
    Error, Res,
};

/// Handle for a per-seat subscription, returned by `subscribe` and accepted
/// by `unsubscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubId(u64);

type Callback = Box<dyn FnMut()>;

/// Owns one `DeckList` per seat and fans change notifications out to a global
/// callback plus any per-seat subscribers.
///
/// Mutations are synchronous; callbacks run in the mutating call stack, after
/// the change has been applied. A callback that reenters a mutating call on
/// the same store risks listener ordering surprises; that discipline is the
/// caller's responsibility and is not enforced here.
pub struct DeckStore {
    lists: Vec<DeckList>,
    on_change: Option<Callback>,
    subs: HashMap<usize, Vec<(SubId, Callback)>>,
    next_sub: u64,
}

impl DeckStore {
    /// One list per seat, seeded with persisted mainboard ids where provided.
    /// Seats beyond the end of `main_ids` start with an empty mainboard.
    pub fn new(pools: &[Vec<CardCopy>], main_ids: &[Vec<CardId>]) -> Self {
        static EMPTY: &[CardId] = &[];
        let lists = pools
            .iter()
            .enumerate()
            .map(|(seat, pool)| {
                let init = main_ids.get(seat).map(Vec::as_slice).unwrap_or(EMPTY);
                DeckList::new(seat, pool, init)
            })
            .collect();
        Self {
            lists,
            on_change: None,
            subs: HashMap::new(),
            next_sub: 0,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.lists.len()
    }

    pub fn seat(&self, seat: usize) -> Res<&DeckList> {
        self.lists.get(seat).ok_or(Error::Seat(seat))
    }

    fn seat_mut(&mut self, seat: usize) -> Res<&mut DeckList> {
        self.lists.get_mut(seat).ok_or(Error::Seat(seat))
    }

    /// Register the global change callback, replacing any previous one.
    pub fn set_on_change(&mut self, f: impl FnMut() + 'static) {
        self.on_change = Some(Box::new(f));
    }

    /// Subscribe to changes on one seat. Multiple subscribers per seat are
    /// independent; drop one with `unsubscribe`.
    pub fn subscribe(&mut self, seat: usize, f: impl FnMut() + 'static) -> Res<SubId> {
        self.seat(seat)?;
        let id = SubId(self.next_sub);
        self.next_sub += 1;
        self.subs.entry(seat).or_default().push((id, Box::new(f)));
        Ok(id)
    }

    pub fn unsubscribe(&mut self, seat: usize, id: SubId) {
        if let Some(subs) = self.subs.get_mut(&seat) {
            subs.retain(|(sub, _)| *sub != id);
        }
    }

    /// Global callback first, then this seat's subscribers.
    fn fire(&mut self, seat: usize) {
        if let Some(f) = self.on_change.as_mut() {
            f();
        }
        if let Some(subs) = self.subs.get_mut(&seat) {
            for (_, f) in subs.iter_mut() {
                f();
            }
        }
    }

    pub fn add_by_pool_index(&mut self, seat: usize, pool_idx: usize) -> Res<()> {
        self.seat_mut(seat)?.add_by_pool_index(pool_idx);
        self.fire(seat);
        Ok(())
    }

    pub fn add_by_id(&mut self, seat: usize, id: CardId, at: Option<usize>) -> Res<()> {
        self.seat_mut(seat)?.add_by_id(id, at);
        self.fire(seat);
        Ok(())
    }

    pub fn remove_at(&mut self, seat: usize, main_idx: usize) -> Res<()> {
        self.seat_mut(seat)?.remove_at(main_idx);
        self.fire(seat);
        Ok(())
    }

    pub fn remove_by_id(&mut self, seat: usize, id: CardId) -> Res<()> {
        self.seat_mut(seat)?.remove_by_id(id);
        self.fire(seat);
        Ok(())
    }

    pub fn clear_main(&mut self, seat: usize) -> Res<()> {
        self.seat_mut(seat)?.clear_main();
        self.fire(seat);
        Ok(())
    }

    pub fn import_main_ids(&mut self, seat: usize, ids: &[CardId]) -> Res<()> {
        self.seat_mut(seat)?.import_main_ids(ids);
        self.fire(seat);
        Ok(())
    }

    /// All seats' mainboard ids, the shape handed to the persistence
    /// collaborator.
    pub fn serialize(&self) -> Vec<Vec<CardId>> {
        self.lists.iter().map(DeckList::serialize).collect()
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::DeckStore;
    use crate::{
        cards::{Card, CardCopy, CardId, Rarity},
        Error,
    };

    fn pools(seats: usize, cards: usize) -> Vec<Vec<CardCopy>> {
        (0..seats)
            .map(|_| {
                (0..cards)
                    .map(|_| CardCopy::mint(Card::sample(Rarity::Common)))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_single_seat_scenario() {
        // Pool [a, b, c] with initial mainboard [b].
        let pools = pools(1, 3);
        let (a, b, c) = (pools[0][0].uid, pools[0][1].uid, pools[0][2].uid);
        let mut store = DeckStore::new(&pools, &[vec![b]]);

        let side: Vec<CardId> = store.seat(0).unwrap().side().iter().map(|x| x.uid).collect();
        assert_eq!(side, vec![a, c]);

        store.remove_by_id(0, b).unwrap();
        assert!(store.seat(0).unwrap().main_ids().is_empty());
        let side: Vec<CardId> = store.seat(0).unwrap().side().iter().map(|x| x.uid).collect();
        assert_eq!(side, vec![a, b, c]);
    }

    #[test]
    fn test_out_of_range_seat() {
        let mut store = DeckStore::new(&pools(2, 1), &[]);
        assert!(matches!(store.seat(2), Err(Error::Seat(2))));
        assert!(store.add_by_pool_index(2, 0).is_err());
        assert!(store.clear_main(5).is_err());
        assert!(store.subscribe(9, || {}).is_err());
    }

    #[test]
    fn test_missing_main_ids_default_empty() {
        let store = DeckStore::new(&pools(3, 2), &[vec![]]);
        for seat in 0..3 {
            assert_eq!(store.seat(seat).unwrap().main_count(), 0);
        }
    }

    #[test]
    fn test_notifications() {
        let pools = pools(2, 2);
        let mut store = DeckStore::new(&pools, &[]);

        let global = Rc::new(Cell::new(0));
        let seat0 = Rc::new(Cell::new(0));
        let seat0_b = Rc::new(Cell::new(0));
        let seat1 = Rc::new(Cell::new(0));

        {
            let global = Rc::clone(&global);
            store.set_on_change(move || global.set(global.get() + 1));
        }
        let s0 = {
            let seat0 = Rc::clone(&seat0);
            store.subscribe(0, move || seat0.set(seat0.get() + 1)).unwrap()
        };
        {
            let seat0_b = Rc::clone(&seat0_b);
            store
                .subscribe(0, move || seat0_b.set(seat0_b.get() + 1))
                .unwrap();
        }
        {
            let seat1 = Rc::clone(&seat1);
            store.subscribe(1, move || seat1.set(seat1.get() + 1)).unwrap();
        }

        store.add_by_pool_index(0, 0).unwrap();
        assert_eq!((global.get(), seat0.get(), seat0_b.get(), seat1.get()), (1, 1, 1, 0));

        store.clear_main(1).unwrap();
        assert_eq!((global.get(), seat0.get(), seat0_b.get(), seat1.get()), (2, 1, 1, 1));

        // Unsubscribing one seat-0 listener leaves the other intact.
        store.unsubscribe(0, s0);
        store.add_by_pool_index(0, 1).unwrap();
        assert_eq!((global.get(), seat0.get(), seat0_b.get(), seat1.get()), (3, 1, 2, 1));
    }

    #[test]
    fn test_serialize_all_seats() {
        let pools = pools(2, 2);
        let mut store = DeckStore::new(&pools, &[]);
        store.add_by_pool_index(0, 1).unwrap();
        assert_eq!(
            store.serialize(),
            vec![vec![pools[0][1].uid], Vec::new()]
        );
    }
}
