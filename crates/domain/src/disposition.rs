use crate::dns_query::DnsQuery;
use crate::local_records::LocalAnswer;

/// How a single query gets answered.
///
/// `decide` style code produces one of `Forwarded`, `ForwardedProbe` or
/// `Answered` without touching the network. A probe then resolves to either
/// `Suppressed` or `Forwarded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Send the original query upstream and relay the reply
    Forwarded(DnsQuery),

    /// Ask upstream for the derived A query before deciding on the AAAA
    ForwardedProbe(DnsQuery),

    /// Answer from the static record table
    Answered(LocalAnswer),

    /// NOERROR with an empty answer section
    Suppressed,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Forwarded(_) => "FORWARDED",
            Disposition::ForwardedProbe(_) => "PROBE",
            Disposition::Answered(_) => "LOCAL",
            Disposition::Suppressed => "SUPPRESSED",
        }
    }
}
