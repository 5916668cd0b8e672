use dnsv4_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

const MAX_UDP_QUERY_SIZE: usize = 4096;
const SOCKET_BUFFER_SIZE: usize = 512 * 1024;

/// Bind the listen address and serve until Ctrl-C.
pub async fn start_dns_server(listen: &str, handler: DnsServerHandler) -> anyhow::Result<()> {
    let socket_addr = resolve_listen_addr(listen).await?;
    let socket = create_udp_socket(socket_addr)
        .map_err(|e| anyhow::anyhow!("Cannot listen on {}: {}", socket_addr, e))?;

    info!(bind_address = %socket_addr, "DNS server ready");

    serve(socket, handler, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
    })
    .await;

    Ok(())
}

async fn resolve_listen_addr(listen: &str) -> anyhow::Result<SocketAddr> {
    if let Ok(addr) = listen.parse::<SocketAddr>() {
        return Ok(addr);
    }

    tokio::net::lookup_host(listen)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve listen address {}: {}", listen, e))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Listen address {} resolved to no address", listen))
}

/// Receive datagrams until `shutdown` completes, one task per datagram.
///
/// After shutdown no new datagram is accepted; tasks already running are
/// awaited, each one bounded by the upstream timeout.
pub async fn serve<F>(socket: UdpSocket, handler: DnsServerHandler, shutdown: F)
where
    F: Future<Output = ()>,
{
    let socket = Arc::new(socket);
    let handler = Arc::new(handler);
    let mut in_flight: JoinSet<()> = JoinSet::new();
    let mut recv_buf = vec![0u8; MAX_UDP_QUERY_SIZE];

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!(in_flight = in_flight.len(), "Shutdown requested, no longer accepting queries");
                break;
            }
            received = socket.recv_from(&mut recv_buf) => {
                let (len, client) = match received {
                    Ok(received) => received,
                    Err(e) if is_transient(&e) => {
                        debug!(error = %e, "Transient UDP recv error");
                        continue;
                    }
                    Err(e) => {
                        error!(error = %e, "UDP recv error");
                        continue;
                    }
                };

                let query_buf: Arc<[u8]> = Arc::from(&recv_buf[..len]);
                let handler = handler.clone();
                let socket = socket.clone();
                in_flight.spawn(async move {
                    let Some(response) = handler.handle_raw(&query_buf, client).await else {
                        return;
                    };
                    if let Err(e) = socket.send_to(&response, client).await {
                        warn!(client = %client, error = %e, "Failed to send DNS response");
                    }
                });

                // reap finished tasks so the set only tracks live ones
                while in_flight.try_join_next().is_some() {}
            }
        }
    }

    while in_flight.join_next().await.is_some() {}
    info!("DNS server stopped");
}

/// Errors a UDP socket reports for a single peer, like ICMP port unreachable
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
    )
}

pub fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
