use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;

use axum::Router;

/// A real HTTP server on a loopback port, serving `router` from its own
/// tokio runtime thread.
pub struct StubServer {
    pub addr: SocketAddr,
}

impl StubServer {
    pub fn spawn(router: Router) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, router).await.unwrap();
            });
        });

        let addr = rx.recv().unwrap();
        Self { addr }
    }

    /// Base URL the client is configured with (routes live under `/api`).
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }
}

/// A base URL nothing is listening on.
pub fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}
