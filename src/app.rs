use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    admin, auth, categories, comments, config::AppConfig, home, recipes, state::AppState, tags,
    users,
};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(home::router())
                .merge(auth::router())
                .merge(users::router())
                .merge(categories::router())
                .merge(recipes::router())
                .merge(comments::router())
                .merge(tags::router())
                .merge(admin::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::{
        auth::jwt::JwtKeys,
        users::repo_types::{ROLE_ADMIN, ROLE_USER},
    };

    fn token(state: &AppState, roles: &[&str]) -> String {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        JwtKeys::from(&state.config.jwt)
            .sign_access(Uuid::new_v4(), &roles)
            .unwrap()
    }

    fn request(method: Method, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(res: axum::response::Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(request(Method::GET, "/api/v1/health", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn account_requires_token() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(request(Method::GET, "/api/v1/account/profile", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(res).await["error"], "Missing Authorization header");
    }

    #[tokio::test]
    async fn refresh_token_is_not_an_access_token() {
        let state = AppState::fake();
        let refresh = JwtKeys::from(&state.config.jwt)
            .sign_refresh(Uuid::new_v4())
            .unwrap();
        let res = build_app(state)
            .oneshot(request(Method::GET, "/api/v1/account/profile", Some(&refresh), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_routes_reject_regular_users() {
        let state = AppState::fake();
        let user = token(&state, &[ROLE_USER]);
        let app = build_app(state);

        let res = app
            .clone()
            .oneshot(request(Method::GET, "/api/v1/admin", Some(&user), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let id = Uuid::new_v4();
        let res = app
            .oneshot(request(
                Method::DELETE,
                &format!("/api/v1/admin/recipes/{id}"),
                Some(&user),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn invalid_registration_is_422() {
        let app = build_app(AppState::fake());
        let body = serde_json::json!({
            "email": "not-an-email",
            "password": "abc",
            "password_confirm": "abd",
        });
        let res = app
            .oneshot(request(Method::POST, "/api/v1/auth/register", None, Some(body)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(res).await;
        assert_eq!(json["error"], "validation failed");
        assert!(json["fields"]["email"].is_array());
    }

    #[tokio::test]
    async fn invalid_category_is_422_for_admin() {
        let state = AppState::fake();
        let admin = token(&state, &[ROLE_USER, ROLE_ADMIN]);
        let body = serde_json::json!({ "name": "Soups", "slug": "Soups And Stews" });
        let res = build_app(state)
            .oneshot(request(
                Method::POST,
                "/api/v1/admin/categories",
                Some(&admin),
                Some(body),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json_body(res).await["fields"]["slug"].is_array());
    }

    #[tokio::test]
    async fn out_of_range_rating_is_422() {
        let state = AppState::fake();
        let user = token(&state, &[ROLE_USER]);
        let id = Uuid::new_v4();
        let body = serde_json::json!({ "content": "Lovely dish", "rating": 9 });
        let res = build_app(state)
            .oneshot(request(
                Method::POST,
                &format!("/api/v1/recipes/{id}/comments"),
                Some(&user),
                Some(body),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(res).await["fields"]["rating"][0],
            "Rating must be between 1 and 5."
        );
    }

    #[tokio::test]
    async fn missing_body_field_is_a_json_validation_error() {
        let state = AppState::fake();
        let admin = token(&state, &[ROLE_USER, ROLE_ADMIN]);
        let body = serde_json::json!({
            "content": "Simmer everything slowly.",
            "category_id": null,
        });
        let res = build_app(state)
            .oneshot(request(
                Method::POST,
                "/api/v1/admin/recipes",
                Some(&admin),
                Some(body),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            res.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "application/json"
        );
        let json = json_body(res).await;
        assert_eq!(json["error"], "validation failed");
        let msg = json["fields"]["body"][0].as_str().unwrap();
        assert!(msg.contains("missing field `title`"), "{msg}");
    }

    #[tokio::test]
    async fn rating_out_of_i16_range_is_a_json_validation_error() {
        let state = AppState::fake();
        let user = token(&state, &[ROLE_USER]);
        let id = Uuid::new_v4();
        let body = serde_json::json!({ "content": "Lovely dish", "rating": 70000 });
        let res = build_app(state)
            .oneshot(request(
                Method::POST,
                &format!("/api/v1/recipes/{id}/comments"),
                Some(&user),
                Some(body),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json_body(res).await["fields"]["body"].is_array());
    }

    #[tokio::test]
    async fn broken_json_is_400_with_json_body() {
        let res = build_app(AppState::fake())
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"email\": "))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(res).await["error"].is_string());
    }

    #[tokio::test]
    async fn bad_path_and_query_are_400_with_json_body() {
        let app = build_app(AppState::fake());

        let res = app
            .clone()
            .oneshot(request(Method::GET, "/api/v1/recipes/not-a-uuid", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(res).await["error"].is_string());

        let res = app
            .oneshot(request(Method::GET, "/api/v1/recipes?page=abc", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(res).await["error"].is_string());
    }
}
