/// Primary keys of the `dinosaur` table (PostgreSQL BIGSERIAL).
pub type DbId = i64;
