#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockBehavior {
    /// Answer from the zone, NXDOMAIN for unknown names
    Answer,
    /// Read queries, never reply
    Silent,
    /// Reply with bytes that are not a DNS message
    Garbage,
}

/// Tiny UDP resolver for tests.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// `zone` maps a lowercase name without trailing dot to its addresses
    pub async fn start(
        zone: HashMap<String, Vec<IpAddr>>,
        behavior: MockBehavior,
    ) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let response = match behavior {
                                MockBehavior::Answer => Self::build_response(&zone, &buf[..len]),
                                MockBehavior::Silent => continue,
                                MockBehavior::Garbage => {
                                    let mut bytes = buf[..2.min(len)].to_vec();
                                    bytes.extend_from_slice(&[0xFF; 3]);
                                    bytes
                                }
                            };
                            let _ = socket.send_to(&response, peer).await;
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

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    fn build_response(zone: &HashMap<String, Vec<IpAddr>>, query: &[u8]) -> Vec<u8> {
        let Ok(request) = Message::from_vec(query) else {
            return vec![];
        };
        let Some(question) = request.queries().first() else {
            return vec![];
        };

        let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
        reply.set_recursion_desired(request.recursion_desired());
        reply.set_recursion_available(true);
        reply.add_query(question.clone());

        let name = question
            .name()
            .to_utf8()
            .trim_end_matches('.')
            .to_ascii_lowercase();

        match zone.get(&name) {
            Some(addresses) => {
                for addr in addresses {
                    let rdata = match (question.query_type(), addr) {
                        (RecordType::A, IpAddr::V4(v4)) => RData::A(A(*v4)),
                        (RecordType::AAAA, IpAddr::V6(v6)) => RData::AAAA(AAAA(*v6)),
                        _ => continue,
                    };
                    reply.add_answer(Record::from_rdata(question.name().clone(), 60, rdata));
                }
                reply.set_response_code(ResponseCode::NoError);
            }
            None => {
                reply.set_response_code(ResponseCode::NXDomain);
            }
        }

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        match reply.emit(&mut encoder) {
            Ok(()) => buf,
            Err(_) => vec![],
        }
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
