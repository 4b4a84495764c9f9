//! TCP listener and the fixed HTTP/1.0 response

use std::net::SocketAddr;

use anyhow::Context;
use http::{StatusCode, Version};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket};

use crate::config::REQUEST_BUFFER_SIZE;

/// Status line and headers, identical for every request.
pub fn response_head() -> String {
    format!(
        "{:?} {}\r\nContent-type: text/html\r\n\r\n",
        Version::HTTP_10,
        StatusCode::OK
    )
}

/// Read and drop whatever the client sent, answer with the page, close.
pub async fn handle_client<S>(stream: &mut S, body: &[u8]) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = [0u8; REQUEST_BUFFER_SIZE];
    let n = stream.read(&mut buf).await?;
    log::debug!("Discarding {} request bytes", n);

    stream.write_all(response_head().as_bytes()).await?;
    stream.write_all(body).await?;
    stream.shutdown().await?;
    Ok(())
}

pub struct StatusPageServer {
    listener: TcpListener,
    page: String,
}

impl StatusPageServer {
    /// Listen on `addr` with `SO_REUSEADDR` and a backlog of one pending
    /// connection. Must be called from within a tokio runtime.
    pub fn bind(addr: SocketAddr, page: String) -> anyhow::Result<Self> {
        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        socket.set_reuseaddr(true)?;
        socket
            .bind(addr)
            .with_context(|| format!("Failed to bind {}", addr))?;
        let listener = socket.listen(1)?;

        Ok(Self { listener, page })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept and serve a single client. The connection is closed on return,
    /// whether or not serving it succeeded.
    pub async fn accept_one(&self) -> anyhow::Result<SocketAddr> {
        let (mut stream, peer) = self.listener.accept().await?;
        log::info!("Client connected from {}", peer);

        handle_client(&mut stream, self.page.as_bytes())
            .await
            .with_context(|| format!("Serving {}", peer))?;

        log::info!("Client disconnected");
        Ok(peer)
    }

    /// Serve clients one after another, forever. A failing client never
    /// stops the loop.
    pub async fn run(&self) {
        loop {
            if let Err(e) = self.accept_one().await {
                log::warn!("Connection closed due to error: {:?}", e);
            }
        }
    }
}
