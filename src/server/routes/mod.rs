mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

use crate::db::Category;
use crate::server::error::ApiError;

pub type ApiResponse<T> = Result<T, ApiError>;

// clients address categories by stringified id, `{"1": "Science", ...}`
pub(crate) fn category_map(categories: Vec<Category>) -> BTreeMap<String, String> {
    categories
        .into_iter()
        .map(|category| (category.id.to_string(), category.kind))
        .collect()
}
