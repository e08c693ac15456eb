use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Auth Service API",
        version = "1.0.0",
        description = "Account creation and credential verification backed by a JSON users file.\n\nRequest bodies may be sent as JSON or as url-encoded forms. Every response body is plain text except `/health`."
    ),
    paths(
        crate::api::auth::signup,
        crate::api::auth::login,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::auth_service::Credentials,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Signup and login endpoints."),
        (name = "Health", description = "Service status."),
    )
)]
pub struct ApiDoc;
