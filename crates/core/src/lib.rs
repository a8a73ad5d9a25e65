pub mod history;
pub mod pocket;
pub mod projector;
pub mod session;
pub mod store;
pub mod validate;

pub use history::History;
pub use pocket::{Colour, Pocket};
pub use projector::project;
pub use session::{Phase, Session, SessionError};
pub use store::{Hydration, MemoryStore, Persisted, Store, StoreError};
pub use validate::{validate, Rejection};

/// Upper bound on the number of recorded entries.
pub const MAX_HISTORY: usize = 30;

/// How many of the newest entries feed the highlight set.
pub const HIGHLIGHT_WINDOW: usize = 9;

/// Storage key holding the history snapshot.
pub const HISTORY_KEY: &str = "history";
