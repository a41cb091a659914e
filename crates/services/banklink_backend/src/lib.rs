// File: services/banklink_backend/src/lib.rs
use axum::Router;
use banklink_common::ServiceFactory;
use banklink_config::AppConfig;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

pub mod service_factory;

/// Assembles the full application: `/api` routes, docs, static files and
/// the HTTP layers.
pub fn build_app(config: Arc<AppConfig>, factory: &dyn ServiceFactory) -> Router {
    let api_router = banklink_common::routes()
        .merge(banklink_onboarding::routes(config.clone(), factory));

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    // Swagger UI and JSON endpoint if the openapi feature is enabled
    #[cfg(feature = "openapi")]
    {
        use banklink_onboarding::doc::OnboardingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Banklink API",
                version = "0.1.0",
                description = "Plaid bank linking and Stripe bank-debit subscriptions",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(OnboardingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    info!("Serving static files from {}", config.server.static_dir);
    app.fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
