pub mod list;
pub mod store;

pub use list::DeckList;
pub use store::DeckStore;
