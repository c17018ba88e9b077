use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_PAGE_NUMBER: i64 = 0;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_SORT_BY: &str = "id";
pub const DEFAULT_SORT_DIRECTION: &str = "asc";

/// PostPageQuery
///
/// Query parameters of `GET /api/v1/posts`. Every parameter is optional and falls back to the
/// listing defaults.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PostPageQuery {
    /// Zero-based page index.
    #[param(default = 0)]
    pub page_no: Option<i64>,
    /// Number of posts per page.
    #[param(default = 10)]
    pub page_size: Option<i64>,
    /// Field to order by: id, title, description, content or categoryId.
    #[param(default = "id")]
    pub sort_by: Option<String>,
    /// "desc" (any case) for descending, anything else is ascending.
    #[param(default = "asc")]
    pub sort_dir: Option<String>,
}

impl PostPageQuery {
    pub fn into_page_request(self) -> Result<PageRequest, AppError> {
        PageRequest::new(
            self.page_no.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY),
            self.sort_dir.as_deref().unwrap_or(DEFAULT_SORT_DIRECTION),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Post columns a listing may be ordered by. Anything else is rejected before it can reach SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Description,
    Content,
    CategoryId,
}

impl SortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(SortField::Id),
            "title" => Some(SortField::Title),
            "description" => Some(SortField::Description),
            "content" => Some(SortField::Content),
            "categoryId" | "category_id" => Some(SortField::CategoryId),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Description => "description",
            SortField::Content => "content",
            SortField::CategoryId => "category_id",
        }
    }
}

/// PageRequest
///
/// A validated (pageNo, pageSize, sortBy, sortDir) tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_no: i64,
    pub page_size: i64,
    pub sort_by: SortField,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page_no: i64, page_size: i64, sort_by: &str, sort_dir: &str) -> Result<Self, AppError> {
        if page_no < 0 {
            return Err(AppError::BadRequest(
                "Page index must not be less than zero".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(AppError::BadRequest(
                "Page size must not be less than one".to_string(),
            ));
        }
        let sort_by = SortField::parse(sort_by).ok_or_else(|| {
            AppError::BadRequest(format!("No property '{}' found for type 'Post'", sort_by))
        })?;

        Ok(Self {
            page_no,
            page_size,
            sort_by,
            direction: SortDirection::parse(sort_dir),
        })
    }

    pub fn offset(&self) -> i64 {
        self.page_no.saturating_mul(self.page_size)
    }
}

/// Page
///
/// One slice of an ordered result set plus the size of the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub request: PageRequest,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> i64 {
        let size = self.request.page_size;
        self.total_elements / size + i64::from(self.total_elements % size != 0)
    }

    pub fn is_last(&self) -> bool {
        self.request.page_no.saturating_add(1) >= self.total_pages()
    }
}
