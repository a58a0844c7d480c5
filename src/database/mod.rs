pub mod pool;

use crate::error::Result;
use sqlx::SqlitePool;

const TABLES: [&str; 6] = [
    "jobs",
    "candidates",
    "assessments",
    "assessment_responses",
    "candidate_timeline",
    "notes",
];

/// Teardown for the reset utility and test isolation: empties every table,
/// leaving the schema in place.
pub async fn clear_all(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    for table in TABLES {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
