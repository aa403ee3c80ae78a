// In-process stand-in for the Ghibli API used by the fetcher tests.
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::get,
    Router,
};
use std::io::{Read, Write};
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Clone)]
struct MockServerState {
    status: StatusCode,
    body: Arc<String>,
    queries: Arc<Mutex<Vec<Option<String>>>>,
}

async fn films_handler(
    State(state): State<MockServerState>,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    state.queries.lock().unwrap().push(query);
    (state.status, state.body.as_ref().clone())
}

/// Serves a canned response on `GET /films` and 404 on every other path.
///
/// The server runs on its own thread and tokio runtime so the blocking
/// reqwest client can call it from a plain `#[test]`. Routing matches the
/// path only, the query string is recorded but never checked.
pub struct MockFilmsApi {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
    queries: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockFilmsApi {
    pub fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let state = MockServerState {
            status,
            body: Arc::new(body.into()),
            queries: Arc::new(Mutex::new(Vec::new())),
        };
        let queries = state.queries.clone();

        let app = Router::new()
            .route("/films", get(films_handler))
            .with_state(state);

        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build mock server runtime");

            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
                    panic!("Failed to bind mock server to 127.0.0.1:0. Error: {}", e);
                });
                addr_tx
                    .send(listener.local_addr().unwrap())
                    .expect("test dropped before the mock server started");

                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        shutdown_rx.await.ok();
                    })
                    .await
                    .unwrap_or_else(|e| eprintln!("Mock films server error: {}", e));
            });
        });

        let addr = addr_rx
            .recv()
            .expect("mock server thread exited before binding");

        MockFilmsApi {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
            queries,
        }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Query strings of every request that reached `/films`, in arrival order.
    pub fn get_queries(&self) -> Vec<Option<String>> {
        self.queries.lock().unwrap().clone()
    }
}

impl Drop for MockFilmsApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Answers a single connection with `response` written verbatim, for status
/// lines a regular server would normalize. Returns the base URL.
pub fn serve_raw_response(response: &'static str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap_or_else(|e| {
        panic!("Failed to bind raw server to 127.0.0.1:0. Error: {}", e);
    });
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });

    format!("http://{}", addr)
}
