use std::{
    cell::Cell,
    io::{BufRead, Write},
    path::PathBuf,
    rc::Rc,
    sync::Arc,
};

use cards::CardCopy;
use deck::DeckStore;
use draft::{
    booster::{BoosterGenerator, RarityIndex},
    pod::Pod,
    DraftConfig,
};
use random::{RandomSource, SeededSource, ThreadSource};
use storage::DirStorage;

mod cards;
mod deck;
mod draft;
mod err;
mod random;
mod storage;

pub use err::{Error, Res};

fn prompt(text: &str) -> Option<String> {
    print!("{text}");
    std::io::stdout().flush().ok()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;
    if line.is_empty() {
        None // EOF
    } else {
        Some(line.trim().to_string())
    }
}

/// Drive the pod to completion, reading the human seat's pick index from
/// stdin each tick. Rejected picks reprompt; EOF falls back to picking first.
fn run_draft(pod: &mut Pod, human_seat: usize) {
    while !pod.is_done() {
        let Some(pack) = pod.current_pack(human_seat) else {
            // Bot-only tail of the round.
            pod.advance(0).expect("bot-only tick cannot be rejected");
            continue;
        };

        println!(
            "\nRound {}, pick {} ({} drafted):",
            pod.round() + 1,
            pod.pick() + 1,
            pod.pile(human_seat).len()
        );
        for (i, card) in pack.iter().enumerate() {
            println!("  [{i:>2}] {:?} {} ({})", card.rarity, card.name(), card.type_line());
        }

        let choice = prompt("pick> ")
            .and_then(|line| line.parse::<usize>().ok())
            .unwrap_or(0);
        if let Err(e) = pod.advance(choice) {
            println!("{e}");
        }
    }
}

/// Minimal deck-building loop over the human seat's pool. Every mutation
/// fires the store's change callback; we persist whenever it has.
fn run_deck_builder(store: &mut DeckStore, storage: &mut DirStorage, seat: usize) -> Res<()> {
    let dirty = Rc::new(Cell::new(false));
    {
        let dirty = Rc::clone(&dirty);
        store.set_on_change(move || dirty.set(true));
    }

    println!("\nDeck building for seat {seat}. Commands: pool, add <pool idx>, cut <main idx>, clear, list, done");
    loop {
        let Some(line) = prompt("deck> ") else {
            break;
        };
        let mut words = line.split_whitespace();
        match (words.next(), words.next().and_then(|w| w.parse::<usize>().ok())) {
            (Some("add"), Some(i)) => store.add_by_pool_index(seat, i)?,
            (Some("cut"), Some(i)) => store.remove_at(seat, i)?,
            (Some("clear"), _) => store.clear_main(seat)?,
            (Some("pool"), _) => {
                let list = store.seat(seat)?;
                println!("Pool ({}):", list.pool_count());
                for (i, copy) in list.pool().iter().enumerate() {
                    println!("  [{i:>2}] {}", copy.card.name());
                }
            }
            (Some("list"), _) => {
                let list = store.seat(seat)?;
                println!("Seat {}, main ({}):", list.seat(), list.main_count());
                for (i, copy) in list.main().iter().enumerate() {
                    println!("  [{i:>2}] {}", copy.card.name());
                }
                println!("Side ({}):", list.side_count());
                for copy in list.side() {
                    println!("       {}", copy.card.name());
                }
            }
            (Some("done"), _) => break,
            (None, _) => {}
            _ => println!("Commands: pool, add <pool idx>, cut <main idx>, clear, list, done"),
        }

        if dirty.get() {
            storage::save_deck_ids(storage, &store.serialize())?;
            dirty.set(false);
        }
    }
    Ok(())
}

/// Skip the draft and reopen a previously saved session for deck building.
fn resume(save: &str, seat: usize) -> Res<()> {
    let mut storage = DirStorage::new(save)?;
    let pools = storage::load_pools(&storage);
    if pools.is_empty() {
        println!("No saved draft found in {save}.");
        return Ok(());
    }
    let deck_ids = storage::load_deck_ids(&storage, pools.len());

    let mut store = DeckStore::new(&pools, &deck_ids);
    tracing::info!("Resumed {} seats from {save}.", store.seat_count());
    run_deck_builder(&mut store, &mut storage, seat)
}

fn run() -> Res<()> {
    const USAGE: &str =
        "Usage: draftpod <corpus.json> <save dir> [seed]\n       draftpod deck <save dir>";

    let corpus = std::env::args().nth(1).expect(USAGE);
    let save = std::env::args().nth(2).expect(USAGE);
    if corpus == "deck" {
        return resume(&save, DraftConfig::default().human_seat);
    }
    let seed = std::env::args()
        .nth(3)
        .map(|s| s.parse::<u64>().unwrap_or_else(|_| panic!("Invalid seed: {s}")));

    let cards = cards::corpus::load_cards(&PathBuf::from(corpus))?;
    let index = Arc::new(RarityIndex::build(&cards));
    tracing::info!("Built {index:?} from {} draftable cards.", index.size());

    let config = DraftConfig::default();
    let rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededSource::from_seed(seed)),
        None => Box::new(ThreadSource),
    };
    let generator = BoosterGenerator::new(index, &config, rng);
    let mut pod = Pod::new(config.clone(), Box::new(generator))?;

    run_draft(&mut pod, config.human_seat);
    tracing::info!("Draft finished across {} seats.", pod.seats());

    let pools: Vec<Vec<CardCopy>> = pod.into_pools();
    let mut storage = DirStorage::new(&save)?;
    storage::save_pools(&mut storage, &pools)?;

    // A fresh draft always starts with empty mainboards.
    let deck_ids = vec![Vec::new(); pools.len()];
    storage::save_deck_ids(&mut storage, &deck_ids)?;
    tracing::info!("Saved {} pools to {}.", pools.len(), storage.root().display());

    let mut store = DeckStore::new(&pools, &deck_ids);
    run_deck_builder(&mut store, &mut storage, config.human_seat)?;

    println!(
        "Final deck: {} main, {} side.",
        store.seat(config.human_seat)?.main_count(),
        store.seat(config.human_seat)?.side_count()
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    if let Err(e) = run() {
        eprintln!("Closed due to error: {e}");
        std::process::exit(1);
    }
}
