//! A listener that accepts connections and never answers.
//!
//! Used for client timeout tests; scripted replies are served with `mockito`,
//! which cannot hold a response back.

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

pub struct StallingServer {
    addr: SocketAddr,
}

impl StallingServer {
    /// Bind an ephemeral port; every connection is held open for `hold`.
    pub fn start(hold: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stalling server");
        let addr = listener.local_addr().expect("stalling server address");
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    break;
                };
                std::thread::spawn(move || {
                    std::thread::sleep(hold);
                    drop(stream);
                });
            }
        });
        Self { addr }
    }

    /// Full URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}
