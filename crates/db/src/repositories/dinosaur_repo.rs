//! Repository for the `dinosaur` table.
//!
//! Every method is a single parameterized statement; nothing here opens a
//! transaction.

use std::collections::BTreeMap;

use diana_core::dinosaur::{DinosaurColumn, NewDinosaur};
use diana_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::dinosaur::Dinosaur;

/// Column list for `dinosaur` queries.
const COLUMNS: &str = "id, name, image, power";

/// Provides data access for dinosaurs.
pub struct DinosaurRepo;

impl DinosaurRepo {
    /// List every dinosaur in insertion order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Dinosaur>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dinosaur ORDER BY id");
        sqlx::query_as::<_, Dinosaur>(&query).fetch_all(pool).await
    }

    /// Find a dinosaur by its ID. Returns `None` if no row matches.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dinosaur>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dinosaur WHERE id = $1");
        sqlx::query_as::<_, Dinosaur>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new dinosaur, returning the row with its assigned ID.
    pub async fn insert(pool: &PgPool, dto: &NewDinosaur) -> Result<Dinosaur, sqlx::Error> {
        let query = format!(
            "INSERT INTO dinosaur (name, image, power) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dinosaur>(&query)
            .bind(&dto.name)
            .bind(&dto.image)
            .bind(&dto.power)
            .fetch_one(pool)
            .await
    }

    /// Delete a dinosaur by ID. Returns the number of rows removed (0 or 1).
    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dinosaur WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Set exactly the given columns on one row.
    ///
    /// Column names come from [`DinosaurColumn`]; every value is bound.
    /// An empty change set issues no statement and reports 0 rows.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        changes: &BTreeMap<DinosaurColumn, String>,
    ) -> Result<u64, sqlx::Error> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE dinosaur SET ");
        let mut assignments = builder.separated(", ");
        for (column, value) in changes {
            assignments.push(column.as_str());
            assignments.push_unseparated(" = ");
            assignments.push_bind_unseparated(value.clone());
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(pool).await?;
        Ok(result.rows_affected())
    }
}
