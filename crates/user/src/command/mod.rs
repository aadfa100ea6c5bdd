mod create;

pub use create::CreateUserInput;

#[derive(Clone)]
pub struct Command(pub sqlx::SqlitePool);
