//! PostgreSQL adapter for MovieRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::map_db_err;
use crate::domain::entities::{Movie, MovieId, MovieInput, Page, PageRequest, Score, UserId};
use crate::domain::ports::MovieRepository;
use crate::entity::{movies, scores};
use crate::error::DomainError;

/// PostgreSQL implementation of MovieRepository
pub struct PostgresMovieRepository {
    db: DatabaseConnection,
}

impl PostgresMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn search_by_title(
        &self,
        title: &str,
        page: &PageRequest,
    ) -> Result<Page<Movie>, DomainError> {
        tracing::debug!(
            title = %title,
            offset = page.offset(),
            size = page.size,
            "Searching movies"
        );

        let paginator = movies::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(movies::Column::Title)))
                    .like(LikeExpr::new(contains_pattern(title)).escape('\\')),
            )
            .order_by_asc(movies::Column::Id)
            .paginate(&self.db, page.size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if page.is_beyond(total) {
            return Ok(Page::new(Vec::new(), page, total));
        }

        let content = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Page::new(
            content.into_iter().map(Movie::from).collect(),
            page,
            total,
        ))
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DomainError> {
        let result = movies::Entity::find_by_id(id.0)
            .find_with_related(scores::Entity)
            .order_by_asc(scores::Column::UserId)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into_iter().next().map(|(model, score_models)| {
            let mut movie = Movie::from(model);
            movie.scores = score_models.into_iter().map(Score::from).collect();
            movie
        }))
    }

    async fn get_reference(&self, id: &MovieId) -> Result<Movie, DomainError> {
        movies::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .map(Movie::from)
            .ok_or_else(|| DomainError::NotFound(format!("Movie {} not found", id)))
    }

    async fn exists_by_id(&self, id: &MovieId) -> Result<bool, DomainError> {
        let count = movies::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(&self, input: &MovieInput) -> Result<Movie, DomainError> {
        let model = movies::ActiveModel {
            id: NotSet,
            title: Set(input.title.clone()),
            score: Set(0.0),
            count: Set(0),
            image: Set(input.image.clone()),
        };

        let result = model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(result.into())
    }

    async fn save(&self, movie: &Movie) -> Result<Movie, DomainError> {
        let model = movies::ActiveModel {
            id: Set(movie.id.0),
            title: Set(movie.title.clone()),
            score: Set(movie.score),
            count: Set(movie.count),
            image: Set(movie.image.clone()),
        };

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Movie {} not found", movie.id))
            }
            e => map_db_err(e),
        })?;

        // The score rows are not touched by this write; carry them over
        let mut saved = Movie::from(result);
        saved.scores = movie.scores.clone();
        Ok(saved)
    }

    async fn delete_by_id(&self, id: &MovieId) -> Result<(), DomainError> {
        let result = movies::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Movie {} not found", id)));
        }

        Ok(())
    }
}

/// Lowercased `%title%` LIKE pattern with the user's own wildcards escaped
fn contains_pattern(title: &str) -> String {
    let mut pattern = String::with_capacity(title.len() + 2);
    pattern.push('%');
    for c in title.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Convert SeaORM model to domain entity (scores not loaded)
impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Movie {
            id: MovieId(model.id),
            title: model.title,
            score: model.score,
            count: model.count,
            image: model.image,
            scores: vec![],
        }
    }
}

impl From<scores::Model> for Score {
    fn from(model: scores::Model) -> Self {
        Score {
            movie_id: MovieId(model.movie_id),
            user_id: UserId(model.user_id),
            value: model.value,
        }
    }
}
