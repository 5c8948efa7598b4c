pub mod favorites;
pub mod session;
pub mod store;

pub use favorites::{search_term, Favorites, FAVORITES_KEY};
pub use session::{Presenter, Session};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreResult};
