use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    mapper,
    models::{Category, CategoryDto, NewCategory},
    repository::RepositoryState,
};

#[derive(Clone)]
pub struct CategoryService {
    repo: RepositoryState,
}

impl CategoryService {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    async fn load(&self, id: i64) -> AppResult<Category> {
        self.repo
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category", "id", id))
    }

    #[instrument(skip(self, dto))]
    pub async fn add(&self, dto: CategoryDto) -> AppResult<CategoryDto> {
        let saved = self.repo.insert_category(NewCategory::from(dto)).await?;
        tracing::info!(category_id = saved.id, "category created");
        Ok(saved.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<CategoryDto> {
        Ok(self.load(id).await?.into())
    }

    pub async fn list_all(&self) -> AppResult<Vec<CategoryDto>> {
        let categories = self.repo.list_categories().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    #[instrument(skip(self, dto))]
    pub async fn update(&self, dto: CategoryDto, id: i64) -> AppResult<CategoryDto> {
        let existing = self.load(id).await?;
        let updated = self
            .repo
            .update_category(&mapper::patch_category(existing, dto))
            .await?
            .ok_or_else(|| AppError::not_found("Category", "id", id))?;
        tracing::info!(category_id = id, "category updated");
        Ok(updated.into())
    }

    /// Posts referencing the category survive with their `categoryId` cleared.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.load(id).await?;
        if !self.repo.delete_category(id).await? {
            return Err(AppError::not_found("Category", "id", id));
        }
        tracing::info!(category_id = id, "category deleted");
        Ok(())
    }
}
