mod planned;
mod rep;

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);
