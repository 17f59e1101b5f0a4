//! Shutdown signal handling for the recorder screen

use colored::Colorize;
use tokio::sync::mpsc;

/// Why the screen was asked to shut down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT / Ctrl+C
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl ShutdownReason {
    /// Signal name for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Shutdown signal listener.
///
/// Listens for OS shutdown signals and forwards them to the screen loop.
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<ShutdownReason>,
}

impl ShutdownSignal {
    /// Start listening for shutdown signals
    #[cfg(unix)]
    pub fn listen() -> Result<Self, std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let (tx, rx) = mpsc::channel(4);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            while sigint.recv().await.is_some() {
                if tx_int.send(ShutdownReason::Interrupt).await.is_err() {
                    break;
                }
            }
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            while sigterm.recv().await.is_some() {
                if tx.send(ShutdownReason::Terminate).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self { receiver: rx })
    }

    /// Start listening for shutdown signals
    #[cfg(not(unix))]
    pub fn listen() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(4);

        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send(ShutdownReason::Interrupt).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self { receiver: rx })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<ShutdownReason> {
        let reason = self.receiver.recv().await;
        if let Some(reason) = reason {
            eprintln!("{} Received {} (shutdown)", "↓".cyan(), reason.as_str());
        }
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_names() {
        assert_eq!(ShutdownReason::Interrupt.as_str(), "SIGINT");
        assert_eq!(ShutdownReason::Terminate.as_str(), "SIGTERM");
    }

    #[tokio::test]
    async fn listen_registers_handlers() {
        assert!(ShutdownSignal::listen().is_ok());
    }
}
