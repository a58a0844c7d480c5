use sqlx::types::Json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::note_dto::CreateNotePayload;
use crate::error::Result;
use crate::models::note::Note;
use crate::services::simulation::NetworkSimulation;
use crate::utils::{id, time};

const NOTE_COLUMNS: &str = "id, candidate_id, content, mentions, created_at, created_by";

#[derive(Clone)]
pub struct NoteService {
    pool: SqlitePool,
    sim: NetworkSimulation,
}

impl NoteService {
    pub fn new(pool: SqlitePool, sim: NetworkSimulation) -> Self {
        Self { pool, sim }
    }

    pub async fn add(&self, candidate_id: &str, payload: CreateNotePayload) -> Result<Note> {
        payload.validate()?;
        self.sim.write_gate().await?;

        let note = Note {
            id: id::synthesize("note"),
            candidate_id: candidate_id.to_string(),
            content: payload.content,
            mentions: Json(payload.mentions),
            created_at: time::now(),
            created_by: payload.created_by,
        };

        sqlx::query(
            "INSERT INTO notes (id, candidate_id, content, mentions, created_at, created_by)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&note.id)
        .bind(&note.candidate_id)
        .bind(&note.content)
        .bind(&note.mentions)
        .bind(note.created_at)
        .bind(&note.created_by)
        .execute(&self.pool)
        .await?;

        Ok(note)
    }

    pub async fn list_for_candidate(&self, candidate_id: &str) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM notes WHERE candidate_id = ? ORDER BY created_at ASC, id ASC",
            NOTE_COLUMNS
        );
        let notes = sqlx::query_as::<_, Note>(&sql)
            .bind(candidate_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }
}
