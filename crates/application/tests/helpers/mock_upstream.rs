#![allow(dead_code)]

use async_trait::async_trait;
use dnsv4_application::ports::UpstreamExchange;
use dnsv4_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

type Key = (String, RecordType);

fn key(name: &str, record_type: RecordType) -> Key {
    (name.trim_end_matches('.').to_ascii_lowercase(), record_type)
}

/// Upstream resolver double: canned answers keyed by name and type,
/// NXDOMAIN for anything unknown. Records every message it receives.
pub struct MockUpstream {
    records: RwLock<HashMap<Key, Vec<RData>>>,
    codes: RwLock<HashMap<Key, ResponseCode>>,
    failures: RwLock<HashSet<Key>>,
    delay: Option<Duration>,
    exchanged: Mutex<Vec<Message>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            codes: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashSet::new()),
            delay: None,
            exchanged: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_a(&self, name: &str, ip: &str) {
        let ip: Ipv4Addr = ip.parse().unwrap();
        self.records
            .write()
            .unwrap()
            .entry(key(name, RecordType::A))
            .or_default()
            .push(RData::A(A(ip)));
    }

    pub fn set_aaaa(&self, name: &str, ip: &str) {
        let ip: Ipv6Addr = ip.parse().unwrap();
        self.records
            .write()
            .unwrap()
            .entry(key(name, RecordType::AAAA))
            .or_default()
            .push(RData::AAAA(AAAA(ip)));
    }

    pub fn set_rcode(&self, name: &str, record_type: RecordType, code: ResponseCode) {
        self.codes
            .write()
            .unwrap()
            .insert(key(name, record_type), code);
    }

    pub fn set_failure(&self, name: &str, record_type: RecordType) {
        self.failures
            .write()
            .unwrap()
            .insert(key(name, record_type));
    }

    pub fn exchanged(&self) -> Vec<Message> {
        self.exchanged.lock().unwrap().clone()
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanged.lock().unwrap().len()
    }

    /// Reply the mock gives for `query`, without recording it
    pub fn reply_for(&self, query: &Message) -> Message {
        let question = &query.queries()[0];
        let k = key(&question.name().to_utf8(), question.query_type());

        let mut reply = Message::new(query.id(), MessageType::Response, query.op_code());
        reply.set_recursion_desired(query.recursion_desired());
        reply.set_recursion_available(true);
        reply.add_query(question.clone());

        if let Some(rdatas) = self.records.read().unwrap().get(&k) {
            for rdata in rdatas {
                reply.add_answer(Record::from_rdata(question.name().clone(), 300, rdata.clone()));
            }
            reply.set_response_code(ResponseCode::NoError);
        } else {
            let code = self
                .codes
                .read()
                .unwrap()
                .get(&k)
                .copied()
                .unwrap_or(ResponseCode::NXDomain);
            reply.set_response_code(code);
        }
        reply
    }
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamExchange for MockUpstream {
    async fn exchange(&self, query: &Message, _timeout: Duration) -> Result<Message, DomainError> {
        self.exchanged.lock().unwrap().push(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let question = &query.queries()[0];
        if self
            .failures
            .read()
            .unwrap()
            .contains(&key(&question.name().to_utf8(), question.query_type()))
        {
            return Err(DomainError::TransportConnectionRefused {
                server: self.server().to_string(),
            });
        }

        Ok(self.reply_for(query))
    }

    fn server(&self) -> &str {
        "mock:53"
    }
}
