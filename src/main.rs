use anyhow::Context;
use chess_capture::core::{load_settings, ClientSettings};
use chess_capture::game::resources::PromotionChannel;
use chess_capture::game::systems::{InputHandle, MoveController};
use chess_capture::game::types::PieceColor;
use chess_capture::networking::HttpAuthority;
use chess_capture::ui::terminal;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Terminal chess board backed by a remote move authority
#[derive(Parser, Debug)]
#[command(name = "chess-capture", version, about)]
struct Args {
    /// Authority base URL (e.g. http://localhost:8080/api)
    #[arg(long)]
    authority: Option<String>,

    /// API key sent with every request
    #[arg(long)]
    api_key: Option<String>,

    /// Side of the board facing you (white or black)
    #[arg(long)]
    view: Option<PieceColor>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl Args {
    fn apply_to(self, settings: &mut ClientSettings) {
        if let Some(url) = self.authority {
            settings.authority_url = url;
        }
        if self.api_key.is_some() {
            settings.api_key = self.api_key;
        }
        if let Some(color) = self.view {
            settings.view_color = color;
        }
        if let Some(secs) = self.timeout {
            settings.request_timeout_secs = secs;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // `log_level` is not known yet; report the load through a scoped subscriber.
    let mut settings =
        tracing::subscriber::with_default(startup_subscriber(std::io::stderr), || {
            load_settings(args.settings.as_deref())
        });
    let log_level = settings.log_level.clone();
    args.apply_to(&mut settings);
    settings.validate().context("invalid settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(run(settings))
}

/// Subscriber active while the settings file is read
fn startup_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_ansi(false)
        .with_writer(writer)
        .finish()
}

async fn run(settings: ClientSettings) -> anyhow::Result<()> {
    let authority = HttpAuthority::new(
        settings.authority_url.clone(),
        settings.api_key.clone(),
        settings.request_timeout(),
    )
    .context("could not set up the authority client")?;

    let (gate, prompts) = PromotionChannel::new();
    let mut controller = MoveController::new(authority, gate, settings.view_color);

    match controller.new_game().await {
        Ok(()) => info!("[MAIN] Connected to {}", settings.authority_url),
        Err(e) => warn!(
            "[MAIN] Could not start a game on {}: {}. Playing from the initial position.",
            settings.authority_url, e
        ),
    }

    terminal::run(InputHandle::new(controller), prompts)
        .await
        .context("terminal shell failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for Captured {
        type Writer = Captured;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_settings_fallback_warning_is_logged_at_startup() {
        //! A corrupt settings file falls back to defaults and says so
        let path = std::env::temp_dir().join(format!(
            "chess-capture-startup-{}.json",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, "{ not json").unwrap();

        let captured = Captured::default();
        let settings =
            tracing::subscriber::with_default(startup_subscriber(captured.clone()), || {
                load_settings(Some(path.as_path()))
            });
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings, ClientSettings::default());
        let log = captured.text();
        assert!(log.contains("WARN"), "missing warning in {log:?}");
        assert!(log.contains("[SETTINGS] Failed to load settings file"));
    }
}
