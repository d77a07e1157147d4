//! Origin that accepts connections and never answers.
//!
//! Each connection's request is read and then ignored; the server reports the
//! moment the client closes the socket.

use std::io::Read;
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

/// Starts the server. Returns the URL and a channel that receives the instant
/// each client connection was closed.
pub fn start() -> (String, mpsc::Receiver<Instant>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let tx = tx.clone();
            thread::spawn(move || {
                let mut stream = stream;
                let mut buf = [0u8; 4096];
                // Blocks until the client hangs up.
                while let Ok(n) = stream.read(&mut buf) {
                    if n == 0 {
                        break;
                    }
                }
                let _ = tx.send(Instant::now());
            });
        }
    });
    (format!("http://127.0.0.1:{}/cover.jpg", port), rx)
}
