use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use promatch_core::{Error, NewCompany, NewProfile, ProfileVectors};
use promatch_rank::SearchRequest;
use promatch_store::{
    refresh_all_companies, refresh_all_profiles, refresh_company_vectors, refresh_profile_ai_bio,
    refresh_profile_vectors, BioGenerator, Embedder, VectorStore,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::search;

/// Constructor-injected dependencies shared by every handler.
pub struct ApiContext {
    pub store: Arc<dyn VectorStore>,
    pub embedder: Arc<dyn Embedder>,
    pub bio_generator: Arc<dyn BioGenerator>,
    /// Cap on displayed search results; `None` means each query's own
    /// num_results.
    pub display_limit: Option<usize>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(context: ApiContext, port: u16) -> std::io::Result<()> {
        let context = web::Data::new(context);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(context.clone())
                .route("/health", web::get().to(health))
                .route("/profiles", web::post().to(create_profile))
                .route("/profiles/embeddings", web::post().to(refresh_profiles))
                .route(
                    "/profiles/{id}/embeddings",
                    web::put().to(update_profile_embeddings),
                )
                .route("/profiles/{id}/ai-bio", web::put().to(update_profile_ai_bio))
                .route("/companies", web::post().to(create_company))
                .route("/companies/embeddings", web::post().to(refresh_companies))
                .route(
                    "/companies/{id}/embeddings",
                    web::put().to(update_company_embeddings),
                )
                .route("/search", web::post().to(search_records))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

fn error_response(err: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        Error::Validation { .. } => HttpResponse::BadRequest().json(body),
        Error::ProfileNotFound(_) | Error::CompanyNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        Error::EmbeddingUnavailable(_) | Error::RankingUnavailable(_) | Error::Generation(_) => {
            HttpResponse::BadGateway().json(body)
        }
        _ => HttpResponse::InternalServerError().json(body),
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" })))
}

#[derive(Serialize)]
struct CreateProfileResponse {
    message: String,
    data: promatch_core::ProfileRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    embeddings: Option<ProfileVectors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embeddings_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_bio_error: Option<String>,
}

/// Create a profile, then compute its embeddings and AI bio.
///
/// The three steps carry no transactional guarantee: the record stays even
/// when a later step fails, and the failure is reported in the response so
/// the caller can re-invoke the matching refresh endpoint.
async fn create_profile(
    context: web::Data<ApiContext>,
    req: web::Json<NewProfile>,
) -> ActixResult<HttpResponse> {
    let fields = req.into_inner();
    if let Err(e) = fields.validate() {
        return Ok(error_response(&e));
    }

    let record = match context.store.insert_profile(fields).await {
        Ok(record) => record,
        Err(e) => return Ok(error_response(&e)),
    };

    let embeddings_error = match refresh_profile_vectors(
        context.store.as_ref(),
        context.embedder.as_ref(),
        &record.id,
    )
    .await
    {
        Ok(_) => None,
        Err(e) => {
            warn!(profile_id = %record.id, error = %e, "embedding generation failed after insert");
            Some(e.to_string())
        }
    };

    let (ai_bio, ai_bio_error) = match refresh_profile_ai_bio(
        context.store.as_ref(),
        context.embedder.as_ref(),
        context.bio_generator.as_ref(),
        &record.id,
    )
    .await
    {
        Ok(update) => (Some(update.ai_bio), None),
        Err(e) => {
            warn!(profile_id = %record.id, error = %e, "AI bio generation failed after insert");
            (None, Some(e.to_string()))
        }
    };

    let data = match context.store.profile(&record.id).await {
        Ok(data) => data,
        Err(e) => return Ok(error_response(&e)),
    };
    let embeddings = if embeddings_error.is_none() {
        Some(data.vectors.clone())
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(CreateProfileResponse {
        message: "Profile created successfully with embeddings and AI bio".to_string(),
        data,
        embeddings,
        embeddings_error,
        ai_bio,
        ai_bio_error,
    }))
}

async fn update_profile_embeddings(
    context: web::Data<ApiContext>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let profile_id = path.into_inner();
    match refresh_profile_vectors(
        context.store.as_ref(),
        context.embedder.as_ref(),
        &profile_id,
    )
    .await
    {
        Ok(fields) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Profile embeddings updated successfully",
            "data": fields,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn update_profile_ai_bio(
    context: web::Data<ApiContext>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let profile_id = path.into_inner();
    match refresh_profile_ai_bio(
        context.store.as_ref(),
        context.embedder.as_ref(),
        context.bio_generator.as_ref(),
        &profile_id,
    )
    .await
    {
        Ok(update) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Profile AI bio updated successfully",
            "data": {
                "ai_bio": update.ai_bio,
                "vector_refreshed": update.vector_refreshed,
            },
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn refresh_profiles(context: web::Data<ApiContext>) -> ActixResult<HttpResponse> {
    match refresh_all_profiles(context.store.as_ref(), context.embedder.as_ref()).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Profile embeddings updated successfully",
            "updated": updated,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[derive(Serialize)]
struct CreateCompanyResponse {
    message: String,
    data: promatch_core::CompanyRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    embeddings: Option<promatch_core::CompanyVectors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embeddings_error: Option<String>,
}

async fn create_company(
    context: web::Data<ApiContext>,
    req: web::Json<NewCompany>,
) -> ActixResult<HttpResponse> {
    let fields = req.into_inner();
    if let Err(e) = fields.validate() {
        return Ok(error_response(&e));
    }

    let record = match context.store.insert_company(fields).await {
        Ok(record) => record,
        Err(e) => return Ok(error_response(&e)),
    };

    let embeddings_error = match refresh_company_vectors(
        context.store.as_ref(),
        context.embedder.as_ref(),
        &record.id,
    )
    .await
    {
        Ok(_) => None,
        Err(e) => {
            warn!(company_id = %record.id, error = %e, "embedding generation failed after insert");
            Some(e.to_string())
        }
    };

    let data = match context.store.company(&record.id).await {
        Ok(data) => data,
        Err(e) => return Ok(error_response(&e)),
    };
    let embeddings = if embeddings_error.is_none() {
        Some(data.vectors.clone())
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(CreateCompanyResponse {
        message: "Company created successfully with embeddings".to_string(),
        data,
        embeddings,
        embeddings_error,
    }))
}

async fn update_company_embeddings(
    context: web::Data<ApiContext>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let company_id = path.into_inner();
    match refresh_company_vectors(
        context.store.as_ref(),
        context.embedder.as_ref(),
        &company_id,
    )
    .await
    {
        Ok(fields) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Company embeddings updated successfully",
            "data": fields,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn refresh_companies(context: web::Data<ApiContext>) -> ActixResult<HttpResponse> {
    match refresh_all_companies(context.store.as_ref(), context.embedder.as_ref()).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Company embeddings updated successfully",
            "updated": updated,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn search_records(
    context: web::Data<ApiContext>,
    req: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    match search::execute(
        context.store.as_ref(),
        context.embedder.as_ref(),
        context.display_limit,
        req.into_inner(),
    )
    .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(error_response(&e)),
    }
}
