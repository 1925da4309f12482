//! PostgreSQL adapter for ScoreRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::map_db_err;
use crate::domain::entities::{Movie, MovieId, Score};
use crate::domain::ports::ScoreRepository;
use crate::entity::{movies, scores};
use crate::error::DomainError;

/// PostgreSQL implementation of ScoreRepository
pub struct PostgresScoreRepository {
    db: DatabaseConnection,
}

impl PostgresScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScoreRepository for PostgresScoreRepository {
    async fn upsert(&self, score: &Score) -> Result<Score, DomainError> {
        // Rolled back on drop unless committed
        let txn = self.db.begin().await.map_err(map_db_err)?;

        // Row lock on the movie serializes concurrent scorers of the same movie
        let locked = movies::Entity::find_by_id(score.movie_id.0)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DomainError::NotFound(format!("Movie {} not found", score.movie_id)))?;

        upsert_row(&txn, score).await?;

        let mut movie = Movie::from(locked);
        movie.scores = load_scores(&txn, score.movie_id).await?;
        movie.recompute_score();

        movies::ActiveModel {
            id: Set(movie.id.0),
            score: Set(movie.score),
            count: Set(movie.count),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(
            movie_id = %score.movie_id,
            user_id = %score.user_id,
            score = movie.score,
            count = movie.count,
            "Score upserted"
        );

        Ok(score.clone())
    }
}

async fn upsert_row<C: ConnectionTrait>(conn: &C, score: &Score) -> Result<(), DomainError> {
    let model = scores::ActiveModel {
        movie_id: Set(score.movie_id.0),
        user_id: Set(score.user_id.0),
        value: Set(score.value),
    };

    scores::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([scores::Column::MovieId, scores::Column::UserId])
                .update_column(scores::Column::Value)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

    Ok(())
}

async fn load_scores<C: ConnectionTrait>(
    conn: &C,
    movie_id: MovieId,
) -> Result<Vec<Score>, DomainError> {
    let rows = scores::Entity::find()
        .filter(scores::Column::MovieId.eq(movie_id.0))
        .order_by_asc(scores::Column::UserId)
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok(rows.into_iter().map(Score::from).collect())
}
