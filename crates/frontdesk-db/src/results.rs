use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Id<T> {
    pub id: T,
}
