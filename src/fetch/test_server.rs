// src/fetch/test_server.rs
//
// Local axum server for exercising the reqwest source.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, task::JoinHandle};
use url::Url;

pub(crate) enum Reply {
    Respond { code: u16, body: Vec<u8> },
    /// Accept the request and never answer.
    Stall,
}

impl Reply {
    pub(crate) fn status(code: u16) -> Self {
        Reply::Respond {
            code,
            body: Vec::new(),
        }
    }

    pub(crate) fn ok(body: Vec<u8>) -> Self {
        Reply::Respond { code: 200, body }
    }
}

type Handler = dyn Fn(&str) -> Reply + Send + Sync;

#[derive(Clone)]
struct ServerState {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub(crate) struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub(crate) async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            handler: Arc::new(handler),
            requests: Arc::clone(&requests),
        };

        let app = Router::new().fallback(respond).with_state(state);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Base URL of the server, ending in `/`.
    pub(crate) fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).unwrap()
    }

    pub(crate) fn url(&self, file: &str) -> Url {
        self.base_url().join(file).unwrap()
    }

    /// Request paths in arrival order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(State(state): State<ServerState>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(path.clone());

    match (state.handler)(&path) {
        Reply::Respond { code, body } => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, body).into_response()
        }
        Reply::Stall => std::future::pending().await,
    }
}
