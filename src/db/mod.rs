pub mod models;
pub mod quotes;
pub mod sessions;
pub mod users;

pub use models::{Quote, QuoteFields, Session, User};
pub use quotes::QuoteRepository;
pub use sessions::SessionRepository;
pub use users::UserRepository;
