//! Construction of the messages the proxy originates itself: the A probe
//! and the replies that never reach upstream.

use dnsv4_domain::{DnsQuery, LocalAnswer, QueryType};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{DNSClass, RData, Record, RecordType};
use std::net::IpAddr;

/// Classify the first question of `request`.
///
/// Returns `None` when the message carries no question at all.
pub fn first_question(request: &Message) -> Option<(DnsQuery, &Query)> {
    let question = request.queries().first()?;
    let query_type = QueryType::from_code(u16::from(question.query_type()));
    let query = DnsQuery::new(question.name().to_utf8(), query_type);
    Some((query, question))
}

/// Type A probe for the name in `question`, with a fresh message id
pub fn probe_query(request: &Message, question: &Query) -> Message {
    let mut query = Query::new();
    query.set_name(question.name().clone());
    query.set_query_type(RecordType::A);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
    message.set_recursion_desired(request.recursion_desired());
    message.add_query(query);
    message
}

/// Reply skeleton for `request`: same id, opcode, RD bit and questions
fn reply_to(request: &Message, code: ResponseCode) -> Message {
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    reply.set_response_code(code);
    for question in request.queries() {
        reply.add_query(question.clone());
    }
    reply
}

/// NOERROR with an empty answer section
pub fn suppressed(request: &Message) -> Message {
    reply_to(request, ResponseCode::NoError)
}

/// FORMERR for requests that cannot be answered at all
pub fn format_error(request: &Message) -> Message {
    reply_to(request, ResponseCode::FormErr)
}

/// NOERROR carrying the addresses from the local record table
pub fn local_answer(request: &Message, question: &Query, answer: &LocalAnswer) -> Message {
    let mut reply = reply_to(request, ResponseCode::NoError);
    reply.set_authoritative(true);

    for addr in &answer.addresses {
        let rdata = match addr {
            IpAddr::V4(ipv4) => RData::A(A(*ipv4)),
            IpAddr::V6(ipv6) => RData::AAAA(AAAA(*ipv6)),
        };
        reply.add_answer(Record::from_rdata(
            question.name().clone(),
            answer.ttl,
            rdata,
        ));
    }
    reply
}

/// True when the answer section holds at least one A record
pub fn has_ipv4_answer(reply: &Message) -> bool {
    reply
        .answers()
        .iter()
        .any(|record| matches!(record.data(), RData::A(_)))
}
