pub mod forwarding;
pub mod server;
pub mod transport;

pub use forwarding::UdpUpstream;
pub use server::DnsServerHandler;
