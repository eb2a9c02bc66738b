//! Minimal HTTP/1.1 server for exercising the real transport in tests.
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const MAX_HEAD_BYTES: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StubRequest {
    pub(crate) method: String,
    pub(crate) target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StubResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
    pub(crate) delay: Option<Duration>,
}

impl StubResponse {
    pub(crate) fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_owned(),
            delay: None,
        }
    }

    pub(crate) const fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: None,
        }
    }

    pub(crate) const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Handler = Arc<dyn Fn(&StubRequest) -> StubResponse + Send + Sync>;

pub(crate) struct StubServer {
    url: String,
    accept_task: JoinHandle<()>,
}

impl StubServer {
    pub(crate) fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

pub(crate) async fn spawn_stub_server<F>(handler: F) -> Result<StubServer, String>
where
    F: Fn(&StubRequest) -> StubResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind stub server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("stub server addr failed: {}", err))?;
    let handler: Handler = Arc::new(handler);

    let accept_task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = Arc::clone(&handler);
            tokio::spawn(handle_client(stream, handler));
        }
    });

    Ok(StubServer {
        url: format!("http://{}", addr),
        accept_task,
    })
}

async fn handle_client(mut stream: TcpStream, handler: Handler) {
    let Some(request) = read_request_head(&mut stream).await else {
        return;
    };
    let response = handler(&request);
    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }
    let payload = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.body
    );
    if stream.write_all(payload.as_bytes()).await.is_err() {
        return;
    }
    drop(stream.shutdown().await);
}

async fn read_request_head(stream: &mut TcpStream) -> Option<StubRequest> {
    let mut head = Vec::new();
    let mut buffer = [0_u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut buffer).await.ok()?;
        if read == 0 || head.len() > MAX_HEAD_BYTES {
            return None;
        }
        head.extend_from_slice(buffer.get(..read)?);
    }
    let text = String::from_utf8_lossy(&head);
    let mut parts = text.lines().next()?.split_whitespace();
    let method = parts.next()?.to_owned();
    let target = parts.next()?.to_owned();
    Some(StubRequest { method, target })
}
