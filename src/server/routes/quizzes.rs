use axum::{extract::State, routing::post, Json, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{app::AppState, error::ApiJson},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

// id 0 means "all categories"; extra keys like "type" are ignored
#[derive(Deserialize)]
struct QuizCategory {
    id: i64,
}

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Serialize)]
struct QuizQuestionBody {
    success: bool,
    question: Option<Question>,
}

// The client carries the whole session in `previous_questions`; once every
// question of the category has been played the response holds no question.
async fn play_quiz(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuizBody>,
) -> ApiResponse<Json<QuizQuestionBody>> {
    let category_id = body.quiz_category.map(|c| c.id).unwrap_or(0);
    let candidates = if category_id == 0 {
        questions::get_all_questions(&pool).await?
    } else {
        questions::get_questions_for_category(&pool, category_id).await?
    };

    let eligible: Vec<Question> = candidates
        .into_iter()
        .filter(|question| !body.previous_questions.contains(&question.id))
        .collect();

    let question = eligible.choose(&mut rand::thread_rng()).cloned();
    if let Some(picked) = &question {
        QUIZ_QUESTIONS_SERVED
            .with_label_values(&[picked.category.to_string().as_str()])
            .inc();
    }

    Ok(Json(QuizQuestionBody {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
