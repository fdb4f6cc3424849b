use std::sync::Arc;

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{GenerateQuestionsRequestDto, InsightsParams, ListQuestionsParams},
};

#[post("/api/questions/generate")]
pub async fn generate_questions(
    state: web::Data<Arc<AppState>>,
    request: web::Json<GenerateQuestionsRequestDto>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .question_service
        .generate_for_document(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/questions")]
pub async fn list_questions(
    state: web::Data<Arc<AppState>>,
    query: web::Query<ListQuestionsParams>,
) -> Result<HttpResponse, AppError> {
    let questions = state
        .question_service
        .list_questions(query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[get("/api/questions/{question_id}")]
pub async fn get_question(
    state: web::Data<Arc<AppState>>,
    question_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let question = state.question_service.get_question(&question_id).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/api/questions/{question_id}")]
pub async fn delete_question(
    state: web::Data<Arc<AppState>>,
    question_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.question_service.delete_question(&question_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Question deleted successfully"
    })))
}

#[get("/api/documents/{document_id}/insights")]
pub async fn document_insights(
    state: web::Data<Arc<AppState>>,
    document_id: web::Path<String>,
    query: web::Query<InsightsParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let insights = state
        .question_service
        .document_insights(&document_id, params.num_topics())
        .await?;
    Ok(HttpResponse::Ok().json(insights))
}
