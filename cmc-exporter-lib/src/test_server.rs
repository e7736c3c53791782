//! Throwaway HTTP/1.1 server for tests, answering a fixed number of connections on a random local port.

use std::io::Read;
use std::io::Write;
use std::net::TcpListener;
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Answers the next `connections` requests with the given status line (e.g. `200 OK`) and body.
    pub fn serve(status: &'static str, body: &str, connections: usize) -> Self {
        let body = body.to_string();

        Self::spawn(connections, move |mut stream| {
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );

            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        })
    }

    /// Accepts the next `connections` requests but never answers them.
    pub fn stall(connections: usize) -> Self {
        Self::spawn(connections, |_stream| thread::sleep(Duration::from_secs(3)))
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/all/views/all/", self.port)
    }

    fn spawn<F>(connections: usize, respond: F) -> Self
    where
        F: Fn(TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        thread::spawn(move || {
            for stream in listener.incoming().take(connections) {
                let mut stream = stream.unwrap();
                read_request(&mut stream);
                respond(stream);
            }
        });

        TestServer { port }
    }
}

/// Consumes the request head; none of the requests under test carry a body.
fn read_request(stream: &mut TcpStream) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];

    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
}
