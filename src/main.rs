mod api_types;
mod api_utils;
mod storage;
mod types;

use api_utils::{to_http422, to_http500};
use tower_http::trace;
use tracing::Level;

use api_types::AddAccountResponse;
use api_types::AppState;
use api_types::Auth;
use api_types::TransferRequest;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use storage::{Storage, TransferError};
use types::account::Account;

fn make_router() -> Router<()> {
    let state = AppState::new(storage::SharedInmemoryStorage::new());
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/account", get(get_accounts).post(add_account))
                .route("/transfer", post(transfer)),
        )
        .with_state(state)
        .layer(
            trace::TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
}

async fn add_account(
    Auth { user_id }: Auth,
    State(mut state): State<AppState>,
    Json(new_account): Json<Account>,
) -> Result<Json<AddAccountResponse>, (StatusCode, String)> {
    let id = state
        .storage
        .add_account(&user_id, new_account)
        .await
        .map_err(to_http500)?;
    Ok(Json(AddAccountResponse { id }))
}

#[axum_macros::debug_handler]
async fn get_accounts(
    Auth { user_id }: Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Account>>, (StatusCode, String)> {
    Ok(Json(
        state
            .storage
            .load_accounts(&user_id)
            .await
            .map_err(to_http500)?,
    ))
}

async fn transfer(
    Auth { user_id }: Auth,
    State(mut state): State<AppState>,
    Json(req): Json<TransferRequest>,
) -> Result<(), (StatusCode, String)> {
    state
        .storage
        .transfer(&user_id, req.source, req.destination, req.amount)
        .await
        .map_err(|err| match err {
            // not enough money is the caller's problem, not the server's
            TransferError::Funds(err) => to_http422(err),
            TransferError::Storage(err) => to_http500(err),
        })
}

#[tokio::main]
async fn main() {
    let format = tracing_subscriber::fmt::format()
        .with_level(true) // include levels in formatted output
        .with_target(true) // include targets
        .with_thread_ids(false) // don't include the thread ID of the current thread
        .with_thread_names(false) // don't include the name of the current thread
        .compact(); // use the `Compact` formatting style.
    tracing_subscriber::fmt().event_format(format).init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    let router = make_router();
    axum::serve(listener, router).await.unwrap();
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn json_post(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn post_account(router: &Router<()>, owner: &str, balance: &str) -> AddAccountResponse {
        let body = format!("{{\"owner\":\"{}\",\"balance\":\"{}\"}}", owner, balance);
        let response = router
            .clone()
            .oneshot(json_post("/api/account", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn add_then_list_accounts() {
        let router = make_router();
        let first = post_account(&router, "John Doe", "2500").await;
        let second = post_account(&router, "Andres", "1500.8989").await;
        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/api/account").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let accounts: Vec<Account> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].owner(), "John Doe");
        assert_eq!(accounts[1].owner(), "Andres");
    }

    #[tokio::test]
    async fn transfer_updates_both_balances() {
        let router = make_router();
        let john = post_account(&router, "John Doe", "2500").await;
        let andres = post_account(&router, "Andres", "1500.8989").await;

        let body = serde_json::to_string(&TransferRequest {
            source: andres.id,
            destination: john.id,
            amount: "500".parse().unwrap(),
        })
        .unwrap();
        let response = router
            .clone()
            .oneshot(json_post("/api/transfer", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/api/account").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let accounts: Vec<Account> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(accounts[0].balance().to_string(), "3000");
        assert_eq!(accounts[1].balance().to_string(), "1000.8989");
    }

    #[tokio::test]
    async fn insufficient_funds_maps_to_422() {
        let router = make_router();
        let john = post_account(&router, "John Doe", "0").await;
        let andres = post_account(&router, "Andres", "1000.12345").await;

        let body = serde_json::to_string(&TransferRequest {
            source: andres.id,
            destination: john.id,
            amount: "1500".parse().unwrap(),
        })
        .unwrap();
        let response = router
            .clone()
            .oneshot(json_post("/api/transfer", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"Insufficient funds");
    }

    #[tokio::test]
    async fn unknown_account_id_maps_to_500() {
        let router = make_router();
        let andres = post_account(&router, "Andres", "100").await;

        let body = serde_json::to_string(&TransferRequest {
            source: andres.id,
            destination: 42,
            amount: "10".parse().unwrap(),
        })
        .unwrap();
        let response = router
            .clone()
            .oneshot(json_post("/api/transfer", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
