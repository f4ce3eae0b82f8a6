use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;
use crate::auth::AuthenticatedUser;
use crate::core::Recommendation;
use crate::models::{
    CreateOpportunityRequest, HealthResponse, OpportunityListResponse,
    OpportunityResponse, RecommendedResponse, Role, UpdateOpportunityRequest,
};
use crate::routes::{error::ApiError, AppState};

const CATALOGUE_EDITORS: &[Role] = &[Role::Admin, Role::Manager];

/// Configure all opportunity-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        // registered before /{id} so "recommended" is not taken for an id
        .route("/opportunities/recommended", web::get().to(recommended))
        .service(
            web::resource("/opportunities")
                .route(web::get().to(list_opportunities))
                .route(web::post().to(create_opportunity)),
        )
        .service(
            web::resource("/opportunities/{id}")
                .route(web::get().to(get_opportunity))
                .route(web::patch().to(update_opportunity))
                .route(web::delete().to(delete_opportunity)),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.opportunities.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommended opportunities for the authenticated user
///
/// GET /api/opportunities/recommended
///
/// Opportunities are ranked by the number of distinct keywords shared
/// between the user's skills/interests and the opportunity's required
/// skills/tags. A profile with no keywords gets an empty list plus a
/// message asking the user to complete it.
async fn recommended(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let profile = user.profile();

    tracing::info!("Recommending opportunities for user: {}", profile.id);

    match state.recommender.recommend(profile).await {
        Ok(Recommendation::ProfileIncomplete) => {
            tracing::info!("User {} has no skills or interests, skipping recommendation", profile.id);
            Ok(HttpResponse::Ok().json(RecommendedResponse::profile_incomplete()))
        }
        Ok(Recommendation::Ranked(opportunities)) => {
            tracing::info!(
                "Returning {} recommended opportunities for user {}",
                opportunities.len(),
                profile.id
            );
            Ok(HttpResponse::Ok().json(RecommendedResponse::ranked(opportunities)))
        }
        Err(e) => {
            tracing::error!("Failed to recommend opportunities for {}: {}", profile.id, e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /api/opportunities
async fn list_opportunities(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let opportunities = state.opportunities.list().await?;
    Ok(HttpResponse::Ok().json(OpportunityListResponse::new(opportunities)))
}

/// GET /api/opportunities/{id}
async fn get_opportunity(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match state.opportunities.get(id).await? {
        Some(opportunity) => Ok(HttpResponse::Ok().json(OpportunityResponse::new(opportunity))),
        None => Err(not_found()),
    }
}

/// POST /api/opportunities (admin, manager)
async fn create_opportunity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateOpportunityRequest>,
) -> Result<HttpResponse, ApiError> {
    user.require_role(CATALOGUE_EDITORS)?;
    req.validate().map_err(|e| ApiError::Validation(e.to_string()))?;

    let opportunity = state
        .opportunities
        .create(req.into_inner().into_new(user.id()))
        .await?;

    tracing::info!("User {} created opportunity {}", user.id(), opportunity.id);

    Ok(HttpResponse::Created().json(OpportunityResponse::new(opportunity)))
}

/// PATCH /api/opportunities/{id} (admin, manager)
async fn update_opportunity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateOpportunityRequest>,
) -> Result<HttpResponse, ApiError> {
    user.require_role(CATALOGUE_EDITORS)?;
    req.validate().map_err(|e| ApiError::Validation(e.to_string()))?;

    let id = path.into_inner();
    match state.opportunities.update(id, req.into_inner().into_patch()).await? {
        Some(opportunity) => {
            tracing::info!("User {} updated opportunity {}", user.id(), id);
            Ok(HttpResponse::Ok().json(OpportunityResponse::new(opportunity)))
        }
        None => Err(not_found()),
    }
}

/// DELETE /api/opportunities/{id} (admin, manager)
async fn delete_opportunity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    user.require_role(CATALOGUE_EDITORS)?;

    let id = path.into_inner();
    if state.opportunities.delete(id).await? {
        tracing::info!("User {} deleted opportunity {}", user.id(), id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(not_found())
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("No opportunity found with that ID".to_string())
}
