use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use gdl90::message::{Heartbeat, TimeOfDay, TrafficReport};
use gdl90::Message;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::error::BroadcastError;
use crate::source::TrafficSource;

/// Accept connections on `settings.listen` forever, spawning one tick
/// loop per client. Each loop emits a Heartbeat followed by one Traffic
/// Report per row in the source's snapshot, once every
/// `settings.interval_ms`.
pub async fn run(settings: Settings, source: Arc<dyn TrafficSource>) -> Result<(), BroadcastError> {
    let listener = TcpListener::bind(settings.listen).await?;
    info!(address = %settings.listen, "listening for GDL 90 clients");

    loop {
        let (socket, peer) = listener.accept().await?;
        info!(%peer, "client connected");
        let settings = settings.clone();
        let source = source.clone();
        tokio::spawn(async move {
            if let Err(error) = serve_client(socket, settings, source).await {
                warn!(%peer, %error, "client session ended with an error");
            } else {
                debug!(%peer, "client disconnected");
            }
        });
    }
}

async fn serve_client(
    mut socket: TcpStream,
    settings: Settings,
    source: Arc<dyn TrafficSource>,
) -> Result<(), BroadcastError> {
    let mut ticker = time::interval(Duration::from_millis(settings.interval_ms));

    loop {
        ticker.tick().await;

        let now = chrono::Utc::now();
        let heartbeat = Message::from(Heartbeat {
            uat_initialized: true,
            timestamp: TimeOfDay {
                hour: now.hour() as u8,
                minute: now.minute() as u8,
                second: now.second() as u8,
            },
            ..Heartbeat::default()
        });
        write_message(&mut socket, &heartbeat, settings.lsb).await?;

        for row in source.snapshot() {
            let report = Message::from(TrafficReport(row.into()));
            write_message(&mut socket, &report, settings.lsb).await?;
        }
    }
}

async fn write_message(socket: &mut TcpStream, message: &Message, lsb: bool) -> Result<(), BroadcastError> {
    let frame = message.encode(lsb)?;
    socket.write_all(&frame).await?;
    Ok(())
}
