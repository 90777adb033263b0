#![allow(dead_code)]
use shimdns_infrastructure::dns::transport::{read_with_length_prefix, send_with_length_prefix};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How a mock upstream reacts to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    /// Reply with a single A record for 93.184.216.34.
    Answer,
    /// Read the query and never reply.
    Silent,
}

type Received = Arc<Mutex<Vec<Vec<u8>>>>;

/// UDP upstream on 127.0.0.1 with an OS-assigned port.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Received,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(mode: MockMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received: Received = Arc::default();
        let log = received.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            log.lock().unwrap().push(buf[..len].to_vec());
                            if mode == MockMode::Answer {
                                let response = build_mock_response(&buf[..len]);
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// TCP upstream on 127.0.0.1 speaking length-prefixed DNS.
pub struct MockTcpDnsServer {
    addr: SocketAddr,
    received: Received,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockTcpDnsServer {
    pub async fn start(mode: MockMode) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let received: Received = Arc::default();
        let log = received.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = listener.accept() => {
                        let Ok((mut stream, _)) = result else { continue };
                        let log = log.clone();
                        tokio::spawn(async move {
                            while let Ok(query) = read_with_length_prefix(&mut stream).await {
                                log.lock().unwrap().push(query.clone());
                                if mode == MockMode::Silent {
                                    continue;
                                }
                                let response = build_mock_response(&query);
                                if send_with_length_prefix(&mut stream, &response).await.is_err() {
                                    break;
                                }
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for MockTcpDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Echo the header and question of `query` with one A answer appended.
pub fn build_mock_response(query: &[u8]) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut response = Vec::with_capacity(512);

    response.extend_from_slice(&query[0..2]);

    response.push(0x81);
    response.push(0x80);

    response.extend_from_slice(&query[4..6]);

    response.extend_from_slice(&[0x00, 0x01]);

    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(&[0x00, 0x00]);

    if query.len() > 12 {
        response.extend_from_slice(&query[12..]);
    }

    response.extend_from_slice(&[
        0xc0, 0x0c, 
        0x00, 0x01, 
        0x00, 0x01, 
        0x00, 0x00, 0x00, 0x3c, 
        0x00, 0x04, 
        93, 184, 216, 34, 
    ]);

    response
}
