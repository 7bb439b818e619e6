use async_trait::async_trait;
use common::{Digest, DigestStore, PipelineError, PipelineResult};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::{Any, AnyPool, Transaction};
use tracing::{info, warn};

pub const POST_STATUS: &str = "Active";
pub const POST_TYPE: &str = "ask";
pub const INITIAL_POINT: f64 = 0.1;
/// The editorial account every digest is published under.
pub const DIGEST_AUTHOR_ID: i64 = 1;

fn persistence(e: sqlx::Error) -> PipelineError {
    PipelineError::Persistence(e.to_string())
}

/// Publishes digests into the blog's `tb_post`, `tb_user` and `tb_post_tag`
/// tables.
#[derive(Clone)]
pub struct PostStore {
    pool: AnyPool,
    author_id: i64,
}

impl PostStore {
    pub async fn connect(database_url: &str) -> PipelineResult<Self> {
        install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(2)
            .connect(database_url)
            .await
            .map_err(persistence)?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: AnyPool) -> Self {
        Self {
            pool,
            author_id: DIGEST_AUTHOR_ID,
        }
    }

    /// Inserts the post, bumps the author's post counter and tags the post,
    /// all in one transaction. Returns the new post id.
    pub async fn save_post(&self, digest: &Digest) -> PipelineResult<i64> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        match self.write_post(&mut tx, digest).await {
            Ok(post_id) => {
                tx.commit().await.map_err(persistence)?;
                info!("Saved post {} (pid {}) with {} stories", post_id, digest.pid, digest.story_count);
                Ok(post_id)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback of pid {} failed: {}", digest.pid, rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn write_post(&self, tx: &mut Transaction<'static, Any>, digest: &Digest) -> PipelineResult<i64> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_post WHERE pid = $1")
            .bind(&digest.pid)
            .fetch_one(&mut **tx)
            .await
            .map_err(persistence)?;
        if existing > 0 {
            return Err(PipelineError::DuplicatePost(digest.pid.clone()));
        }

        let post_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tb_post
                (title, link, status, content, "upVote", "collectVote", type, user_id, pid,
                 "commentCount", point, top, "clickVote", created_at)
            VALUES ($1, '', $2, $3, 0, 0, $4, $5, $6, 0, $7, 0, 0, CURRENT_TIMESTAMP)
            RETURNING id
            "#,
        )
        .bind(&digest.title)
        .bind(POST_STATUS)
        .bind(&digest.content)
        .bind(POST_TYPE)
        .bind(self.author_id)
        .bind(&digest.pid)
        .bind(INITIAL_POINT)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .map_or(false, |db| db.is_unique_violation());
            if duplicate {
                PipelineError::DuplicatePost(digest.pid.clone())
            } else {
                persistence(e)
            }
        })?;

        let updated = sqlx::query(r#"UPDATE tb_user SET "postCount" = "postCount" + 1 WHERE id = $1"#)
            .bind(self.author_id)
            .execute(&mut **tx)
            .await
            .map_err(persistence)?;
        if updated.rows_affected() == 0 {
            return Err(PipelineError::Persistence(format!(
                "author {} does not exist",
                self.author_id
            )));
        }

        sqlx::query("INSERT INTO tb_post_tag (tb_post_id, tb_tag_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(digest.source.tag_id())
            .execute(&mut **tx)
            .await
            .map_err(persistence)?;

        Ok(post_id)
    }
}

#[async_trait]
impl DigestStore for PostStore {
    async fn save_post(&self, digest: &Digest) -> PipelineResult<i64> {
        PostStore::save_post(self, digest).await
    }
}
