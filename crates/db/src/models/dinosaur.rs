use serde::Serialize;
use sqlx::FromRow;
use diana_core::types::DbId;

/// A row from the `dinosaur` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Dinosaur {
    pub id: DbId,
    pub name: String,
    pub image: String,
    pub power: String,
}
