use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{
        app::AppState,
        deserializers::{default_page, deserialize_page_number},
        error::{ApiError, ApiJson},
    },
    telemetry::QUESTIONS_CREATED,
};

use super::{category_map, ApiResponse};

const QUESTIONS_PER_PAGE: i64 = 10;

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page_number")]
    page: i64,
}

#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionListBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<String, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    created: i64,
    total_questions: i64,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct SearchResultBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

// a page past the end is an empty list with the true total, not an error
async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<QuestionListBody>> {
    let page = page.max(1);
    let offset = (page - 1) * QUESTIONS_PER_PAGE;
    let questions = questions::get_questions_page(&pool, QUESTIONS_PER_PAGE, offset).await?;
    let total_questions = questions::count_questions(&pool).await?;
    let categories = categories::get_all_categories(&pool).await?;
    Ok(Json(QuestionListBody {
        success: true,
        questions,
        total_questions,
        categories: category_map(categories),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(form): ApiJson<NewQuestion>,
) -> ApiResponse<(StatusCode, Json<CreatedBody>)> {
    let question = form
        .question
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::BadRequest)?;
    let answer = form
        .answer
        .filter(|a| !a.is_empty())
        .ok_or(ApiError::BadRequest)?;
    let category = form.category.ok_or(ApiError::BadRequest)?;
    let difficulty = form.difficulty.ok_or(ApiError::BadRequest)?;

    let created = questions::create_question(&pool, &question, &answer, category, difficulty).await?;
    let total_questions = questions::count_questions(&pool).await?;
    QUESTIONS_CREATED.inc();

    Ok((
        StatusCode::CREATED,
        Json(CreatedBody {
            success: true,
            created,
            total_questions,
        }),
    ))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<DeletedBody>> {
    let deleted = questions::delete_question(&pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(DeletedBody {
        success: true,
        deleted: id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResultBody>> {
    let term = body
        .search_term
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::BadRequest)?;
    let questions = questions::search_questions(&pool, &term).await?;
    Ok(Json(SearchResultBody {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
