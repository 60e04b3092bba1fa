use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::core::error::AppError;
use crate::middleware::AuthManager;
use crate::modules::reports::models::{DateWindow, ReportRequest};
use crate::modules::reports::repositories::MySqlAggregationSource;
use crate::modules::reports::services::ReportService;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn service(pool: &web::Data<MySqlPool>) -> ReportService<MySqlAggregationSource> {
    ReportService::new(MySqlAggregationSource::new(pool.get_ref().clone()))
}

/// POST /reports/stats
///
/// Cost, revenue and profit totals per entity for the requested window.
pub async fn get_statistics(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    request: web::Json<ReportRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let window = DateWindow::new(request.start_date, request.end_date)?;

    let stats = service(&pool)
        .generate_stats(&manager.id, &window, request.kind)
        .await?;

    Ok(HttpResponse::Ok().json(stats))
}

/// POST /reports/excel
///
/// Same aggregates rendered as a downloadable spreadsheet. The artifact is
/// built in memory and exists only for this response.
pub async fn generate_excel_report(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    request: web::Json<ReportRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let window = DateWindow::new(request.start_date, request.end_date)?;

    let bytes = service(&pool)
        .generate_excel(&manager.id, &window, request.kind)
        .await?;

    let filename = format!("raport_{}_{}.xlsx", window.start, window.end);

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/stats", web::post().to(get_statistics))
            .route("/excel", web::post().to(generate_excel_report)),
    );
}
