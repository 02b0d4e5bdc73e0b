//! Persistent question store implementation using PostgreSQL.

use crate::domain::model::{Category, NewQuestion, Question};
use crate::domain::search::escape_like;
use crate::storage::{QuestionStore, StoreResult};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// A question store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    /// Connects to the database and creates the tables if they are missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::from_pool(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Wraps an existing pool. The schema is not touched.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS categories (
                id SERIAL PRIMARY KEY,
                type TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS questions (
                id SERIAL PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category INTEGER NOT NULL,
                difficulty INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category)")
            .execute(&self.pool)
            .await?;

        tracing::debug!("question bank schema ready");
        Ok(())
    }
}

fn question_from_row(row: &PgRow) -> Result<Question, sqlx::Error> {
    Ok(Question {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        category: row.try_get("category")?,
        difficulty: row.try_get("difficulty")?,
    })
}

fn category_from_row(row: &PgRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        kind: row.try_get("type")?,
    })
}

fn questions_from_rows(rows: &[PgRow]) -> Result<Vec<Question>, sqlx::Error> {
    rows.iter().map(question_from_row).collect()
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(category_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn get_category(&self, id: i32) -> StoreResult<Option<Category>> {
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(category_from_row).transpose()?)
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        let sql = format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(questions_from_rows(&rows)?)
    }

    async fn get_question(&self, id: i32) -> StoreResult<Option<Question>> {
        let sql = format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(question_from_row).transpose()?)
    }

    async fn questions_by_category(&self, category: i32) -> StoreResult<Vec<Question>> {
        let sql = format!(
            "SELECT {} FROM questions WHERE category = $1 ORDER BY id",
            QUESTION_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(questions_from_rows(&rows)?)
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let sql = format!(
            r"SELECT {} FROM questions WHERE question ILIKE '%' || $1 || '%' ESCAPE '\' ORDER BY id",
            QUESTION_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(escape_like(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(questions_from_rows(&rows)?)
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(question.question())
        .bind(question.answer())
        .bind(question.category())
        .bind(question.difficulty())
        .fetch_one(&self.pool)
        .await?;
        Ok(question.into_question(id))
    }

    async fn delete_question(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn load_seed(&self, categories: &[Category], questions: &[Question]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        for category in categories {
            sqlx::query(
                "INSERT INTO categories (id, type) VALUES ($1, $2)
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(category.id)
            .bind(&category.kind)
            .execute(&mut *tx)
            .await?;
        }

        for question in questions {
            sqlx::query(
                "INSERT INTO questions (id, question, answer, category, difficulty)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(question.id)
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .execute(&mut *tx)
            .await?;
        }

        // Explicit ids bypass the serial sequences; move them past the seeded rows.
        for table in ["categories", "questions"] {
            let sql = format!(
                "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
                 COALESCE((SELECT MAX(id) FROM {table}), 0) + 1, false)"
            );
            sqlx::query(&sql).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
