// Route exports
pub mod error;
pub mod opportunities;

use crate::auth::AuthConfig;
use crate::core::Recommender;
use crate::services::{OpportunityStore, UserStore};
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub opportunities: Arc<dyn OpportunityStore>,
    pub users: Arc<dyn UserStore>,
    pub recommender: Recommender,
    pub auth: AuthConfig,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(opportunities::configure),
    );
}

/// Register state and the JSON error handlers on an app
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(error::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(error::handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(error::handle_path_error))
            .configure(configure_routes);
    }
}
