use sqlx::FromRow;

/// Row of the `clients` table.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
}
