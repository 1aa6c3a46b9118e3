//! HTTP surface over the message store.
//!
//! One resource, `/api/messages`, with list, create and preflight. Every
//! response carries `Access-Control-Allow-Origin`; with the default `*` any
//! site can read and post, which is only acceptable for a demo deployment.

pub mod error;
pub mod handlers;

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    http::{HeaderValue, header},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::storage::{MessageStore, StoreError, StoreResult};

pub const MESSAGES_PATH: &str = "/api/messages";

/// Shared handler state; the store is the only shared resource
#[derive(Clone)]
pub struct ApiState {
    store: Arc<Mutex<MessageStore>>,
}

impl ApiState {
    pub fn new(store: MessageStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` against the store on the blocking pool
    pub async fn with_store<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&MessageStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let guard = store.lock().map_err(|_| StoreError::Poisoned)?;
            f(&guard)
        })
        .await?
    }
}

pub fn router(state: ApiState, allow_origin: HeaderValue) -> Router {
    Router::new()
        .route(
            MESSAGES_PATH,
            get(handlers::list_messages)
                .post(handlers::create_message)
                .options(handlers::preflight),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            allow_origin,
        ))
        .with_state(state)
}

/// Serve `app` until ctrl-c
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Received shutdown signal, stopping API server...");
            }
        })
        .await
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::net::SocketAddr;

    use super::*;

    pub fn wildcard() -> HeaderValue {
        HeaderValue::from_static("*")
    }

    /// Bind the router on an ephemeral port and return its base URL.
    pub async fn spawn_server(state: ApiState) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        let app = router(state, wildcard());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Make every subsequent store call fail.
    pub async fn break_store(state: &ApiState) {
        state
            .with_store(|store| {
                store
                    .database()
                    .connection()
                    .execute("DROP TABLE messages", [])?;
                Ok(())
            })
            .await
            .unwrap();
    }
}
