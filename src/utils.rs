//! Utility functions.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use tracing::info;

/// Wait for Ctrl+C (or SIGTERM on unix) to trigger graceful shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Resolve the address other hosts on the LAN would use to reach us.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
pub fn local_ip() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)))?;
    socket.connect(SocketAddr::from((Ipv4Addr::new(192, 0, 2, 1), 80)))?;
    let ip = socket.local_addr()?.ip();

    if ip.is_unspecified() {
        return Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            "no routable local address",
        ));
    }

    Ok(ip)
}

/// Log where the simulator can be reached. Never fails.
pub fn log_reachable_addresses(port: u16) {
    match local_ip() {
        Ok(ip) => {
            info!("Server running on IP: {}", ip);
            info!("To access from the Android app, make sure your phone is on the same network");
            info!("Use URL: {}", url_for(ip, port, "/height"));
        }
        Err(e) => info!("Could not determine IP address: {}", e),
    }
}

/// Build an `http://` URL, omitting the default port.
pub fn url_for(ip: IpAddr, port: u16, path: &str) -> String {
    let host = match ip {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => format!("[{}]", v6),
    };

    if port == 80 {
        format!("http://{}{}", host, path)
    } else {
        format!("http://{}:{}{}", host, port, path)
    }
}
