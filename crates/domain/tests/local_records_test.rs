use dnsv4_domain::{DnsQuery, DomainError, LocalDnsRecord, LocalRecords, QueryType};
use std::net::IpAddr;

fn record(hostname: &str, ip: &str, record_type: &str) -> LocalDnsRecord {
    LocalDnsRecord {
        hostname: hostname.to_string(),
        ip: ip.to_string(),
        record_type: record_type.to_string(),
        ttl: None,
    }
}

#[test]
fn test_lookup_is_case_and_dot_insensitive() {
    let mut table = LocalRecords::new();
    table
        .insert(&record("NAS.home", "192.168.1.20", "A"))
        .unwrap();

    let answer = table
        .lookup(&DnsQuery::new("nas.HOME.", QueryType::A))
        .unwrap();

    assert_eq!(answer.addresses, vec!["192.168.1.20".parse::<IpAddr>().unwrap()]);
    assert_eq!(answer.ttl, 300);
}

#[test]
fn test_lookup_matches_type() {
    let mut table = LocalRecords::new();
    table.insert(&record("nas.home", "192.168.1.20", "A")).unwrap();

    assert!(table
        .lookup(&DnsQuery::new("nas.home", QueryType::AAAA))
        .is_none());
    assert!(table
        .lookup(&DnsQuery::new("nas.home", QueryType::Other(16)))
        .is_none());
}

#[test]
fn test_multiple_addresses_for_one_name() {
    let mut table = LocalRecords::new();
    table.insert(&record("lb.home", "10.0.0.1", "A")).unwrap();
    table.insert(&record("lb.home", "10.0.0.2", "a")).unwrap();

    let answer = table.lookup(&DnsQuery::new("lb.home", QueryType::A)).unwrap();
    assert_eq!(answer.addresses.len(), 2);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_family_mismatch_rejected() {
    let mut table = LocalRecords::new();
    let result = table.insert(&record("nas.home", "::1", "A"));
    assert!(matches!(result, Err(DomainError::InvalidIpAddress(_))));
    assert!(table.is_empty());
}

#[test]
fn test_bad_ip_rejected() {
    let mut table = LocalRecords::new();
    let result = table.insert(&record("nas.home", "not-an-ip", "A"));
    assert!(matches!(result, Err(DomainError::InvalidIpAddress(_))));
}

#[test]
fn test_unsupported_type_rejected() {
    let mut table = LocalRecords::new();
    let result = table.insert(&record("nas.home", "10.0.0.1", "MX"));
    assert!(matches!(result, Err(DomainError::UnsupportedRecordType(_))));
}
