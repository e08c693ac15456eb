use actix_web::{web, Either, HttpResponse};
use crate::{database::UserStore, services::auth_service, utils::AppError};
use crate::services::auth_service::{Credentials, PasswordPolicy};

/// Accepts either `application/json` or `application/x-www-form-urlencoded`.
/// Anything else (or an unparseable body) reads as a request with no fields.
pub type CredentialsBody =
    Result<Either<web::Json<Credentials>, web::Form<Credentials>>, actix_web::Error>;

fn into_credentials(body: CredentialsBody) -> Credentials {
    match body {
        Ok(Either::Left(json)) => json.into_inner(),
        Ok(Either::Right(form)) => form.into_inner(),
        Err(e) => {
            log::debug!("Unreadable request body: {}", e);
            Credentials::default()
        }
    }
}

fn error_response(e: &AppError, action: &str) -> HttpResponse {
    let body = match e {
        AppError::Store(_) | AppError::Internal(_) => format!("Server error during {}.", action),
        _ => e.to_string(),
    };
    HttpResponse::build(e.status_code())
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body(
        content = Credentials,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "Signup successful!", body = String),
        (status = 400, description = "Email and password are required."),
        (status = 409, description = "Email already registered."),
        (status = 500, description = "Server error during signup.")
    )
)]
pub async fn signup(
    store: web::Data<UserStore>,
    policy: web::Data<PasswordPolicy>,
    body: CredentialsBody,
) -> HttpResponse {
    let credentials = into_credentials(body);
    let email = credentials.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /signup - email: {}", email);

    match auth_service::signup(&store, &policy, &credentials).await {
        Ok(()) => {
            log::info!("✅ Signup successful: {}", email);
            HttpResponse::Created()
                .content_type("text/plain; charset=utf-8")
                .body("Signup successful!")
        }
        Err(e @ (AppError::Store(_) | AppError::Internal(_))) => {
            log::error!("❌ Signup failed: {} - {}", email, e);
            error_response(&e, "signup")
        }
        Err(e) => {
            log::warn!("❌ Signup rejected: {} - {}", email, e);
            error_response(&e, "signup")
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body(
        content = Credentials,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Login successful!", body = String),
        (status = 400, description = "Email and password are required."),
        (status = 401, description = "Invalid credentials."),
        (status = 500, description = "Server error during login.")
    )
)]
pub async fn login(
    store: web::Data<UserStore>,
    policy: web::Data<PasswordPolicy>,
    body: CredentialsBody,
) -> HttpResponse {
    let credentials = into_credentials(body);
    let email = credentials.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /login - email: {}", email);

    match auth_service::login(&store, &policy, &credentials).await {
        Ok(()) => {
            log::info!("✅ Login successful: {}", email);
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body("Login successful!")
        }
        Err(e @ (AppError::Store(_) | AppError::Internal(_))) => {
            log::error!("❌ Login failed: {} - {}", email, e);
            error_response(&e, "login")
        }
        Err(e) => {
            log::warn!("❌ Login rejected: {} - {}", email, e);
            error_response(&e, "login")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use actix_web::{http::StatusCode, test, App};

    struct TestApp {
        dir: tempfile::TempDir,
        store: web::Data<UserStore>,
    }

    impl TestApp {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::create_dir(dir.path().join("public")).unwrap();
            let store = web::Data::new(UserStore::new(dir.path().join("users.json")));
            Self { dir, store }
        }

        fn public_dir(&self) -> std::path::PathBuf {
            self.dir.path().join("public")
        }
    }

    macro_rules! init_app {
        ($t:expr, $policy:expr) => {
            test::init_service(
                App::new()
                    .app_data($t.store.clone())
                    .app_data(web::Data::new($policy))
                    .configure(api::routes($t.public_dir())),
            )
            .await
        };
        ($t:expr) => {
            init_app!($t, PasswordPolicy::Plaintext)
        };
    }

    fn json_post(uri: &str, email: &str, password: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .set_json(serde_json::json!({ "email": email, "password": password }))
    }

    async fn body_text(res: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(res).await;
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_signup_and_login_scenario() {
        let t = TestApp::new();
        let app = init_app!(t);

        let res = test::call_service(&app, json_post("/signup", "a@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(body_text(res).await, "Signup successful!");

        let res = test::call_service(&app, json_post("/signup", "a@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(body_text(res).await, "Email already registered.");

        let res = test::call_service(&app, json_post("/login", "a@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "Login successful!");

        let res = test::call_service(&app, json_post("/login", "a@x.com", "wrong").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(res).await, "Invalid credentials.");

        let res = test::call_service(&app, json_post("/login", "b@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_form_encoded_bodies() {
        let t = TestApp::new();
        let app = init_app!(t);

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_form([("email", "a@x.com"), ("password", "p1")])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", "a@x.com"), ("password", "p1")])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_fields_are_bad_request() {
        let t = TestApp::new();
        let app = init_app!(t);

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_json(serde_json::json!({ "email": "a@x.com" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(res).await, "Email and password are required.");

        let res = test::call_service(&app, json_post("/signup", "", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        // No content type at all
        let req = test::TestRequest::post().uri("/login").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        // Malformed JSON
        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"email\":")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        assert!(!t.store.path().exists());
    }

    #[actix_web::test]
    async fn test_login_without_users_file() {
        let t = TestApp::new();
        let app = init_app!(t);

        let res = test::call_service(&app, json_post("/login", "a@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(res).await, "Invalid credentials.");
    }

    #[actix_web::test]
    async fn test_corrupt_users_file_is_server_error() {
        let t = TestApp::new();
        std::fs::write(t.store.path(), "[{]").unwrap();
        let app = init_app!(t);

        let res = test::call_service(&app, json_post("/signup", "a@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(res).await, "Server error during signup.");

        let res = test::call_service(&app, json_post("/login", "a@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(res).await, "Server error during login.");

        assert_eq!(std::fs::read_to_string(t.store.path()).unwrap(), "[{]");
    }

    #[actix_web::test]
    async fn test_bcrypt_policy_over_http() {
        let t = TestApp::new();
        let app = init_app!(t, PasswordPolicy::Bcrypt { cost: 4 });

        let res = test::call_service(&app, json_post("/signup", "a@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let stored = t.store.load().await.unwrap();
        assert_ne!(stored[0].password, "p1");

        let res = test::call_service(&app, json_post("/login", "a@x.com", "p1").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
