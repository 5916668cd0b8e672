pub mod message_codec;
pub mod response_parser;
pub mod upstream;

pub use message_codec::MessageCodec;
pub use response_parser::ResponseParser;
pub use upstream::UdpUpstream;
