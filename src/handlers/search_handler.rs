use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::SearchRequest,
    services::export_service,
};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[post("/api/search_universities")]
async fn search_universities(
    state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let catalog = state.catalog.load()?;
    let results = state.search_service.search(&request, catalog).await;

    state.result_cache.set(results.clone()).await;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/api/check_health")]
async fn check_health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

#[get("/api/download_excel")]
async fn download_excel(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let results = state
        .result_cache
        .get()
        .await
        .filter(|results| !results.is_empty())
        .ok_or_else(|| AppError::NotFound("No data available".to_string()))?;

    let buffer = export_service::build_workbook(&results)?;

    Ok(HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"universities.xlsx\"",
        ))
        .body(buffer))
}
