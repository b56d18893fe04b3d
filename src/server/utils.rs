use std::ops::RangeInclusive;
use tokio::signal;

/// Resolves on Ctrl+C or SIGTERM, for axum's graceful shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

const PORT_RANGE: RangeInclusive<u16> = 1..=65535;

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: u16 = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a port number"))?;
    if PORT_RANGE.contains(&port) {
        Ok(port)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_in_range_accepts_valid_ports() {
        assert_eq!(port_in_range("3000"), Ok(3000));
        assert_eq!(port_in_range("1"), Ok(1));
        assert_eq!(port_in_range("65535"), Ok(65535));
    }

    #[test]
    fn test_port_in_range_rejects_invalid_input() {
        assert!(port_in_range("0").is_err());
        assert!(port_in_range("65536").is_err());
        assert!(port_in_range("not-a-port").is_err());
    }
}
