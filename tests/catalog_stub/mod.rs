use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

/// How the stubbed catalog answers every request it receives.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// 200 with the given body.
    Json(String),
    /// The given status code with the given body.
    Status(u16, String),
}

/// In-process stand-in for the Google Books API, so the client can be
/// exercised without the network. Counts requests so tests can assert the
/// zero-call short circuits.
pub struct CatalogStub {
    pub base_url: String,
    requests: Arc<AtomicUsize>,
    last_url: Arc<Mutex<Option<String>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl CatalogStub {
    pub fn spawn(behavior: StubBehavior) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start catalog stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let requests = Arc::new(AtomicUsize::new(0));
        let last_url = Arc::new(Mutex::new(None));
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let thread_requests = Arc::clone(&requests);
        let thread_last_url = Arc::clone(&last_url);
        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                thread_requests.fetch_add(1, Ordering::SeqCst);
                *thread_last_url.lock().expect("record stub url") =
                    Some(request.url().to_string());

                let (status, body) = match &behavior {
                    StubBehavior::Json(body) => (200, body.clone()),
                    StubBehavior::Status(status, body) => (*status, body.clone()),
                };

                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("build header");
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            last_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Path and query string of the most recent request, if any.
    #[allow(dead_code)]
    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().expect("read stub url").clone()
    }
}

impl Drop for CatalogStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Base URL of a local port nothing is listening on, for transport-failure
/// tests.
#[allow(dead_code)]
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let addr = listener.local_addr().expect("read reserved port");
    drop(listener);
    format!("http://{addr}")
}
