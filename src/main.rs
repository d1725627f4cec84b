use airwave::app::cli::Args;
use airwave::app::config::AppConfig;
use airwave::app::events::AppEvent;
use airwave::app::{inputs, logging, App, ArtworkState};
use airwave::artwork::ArtworkRenderer;
use airwave::playback::create_backend;
use airwave::radio::{NowPlayingClient, PlayerController};
use airwave::ui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

type Tui = Terminal<CrosstermBackend<Stdout>>;
type Controller = PlayerController<NowPlayingClient, AppEvent>;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    restore_terminal_on_panic();

    let args = Args::parse();
    if args.generate_config {
        println!("{}", AppConfig::default_config_toml()?);
        return Ok(());
    }

    // Keep the guard alive for the whole run
    let _log_guard = match logging::init(&AppConfig::get_log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    let (mut config, saved) = AppConfig::load();
    args.apply(&mut config);

    // Global HTTP Client (Reused for polling and artwork)
    let client = reqwest::Client::builder()
        .user_agent(concat!("airwave/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let timeout = config.polling.request_timeout();
    let source = Arc::new(
        NowPlayingClient::with_client(
            client.clone(),
            &config.station.base_url,
            &config.station.station_id,
            timeout,
        )
        .context("invalid station settings")?,
    );
    let stream_url = config.station.resolved_stream_url();
    info!(url = %source.url(), stream = %stream_url, "Starting airwave");

    let (tx, mut rx) = mpsc::channel(100);

    // Media events come from the backend's own task/thread
    let (media_tx, mut media_rx) = mpsc::unbounded_channel();
    let media = create_backend(
        config.playback.backend,
        &stream_url,
        &config.playback.player_command,
        media_tx,
    )
    .context("could not set up playback")?;
    let tx_media = tx.clone();
    tokio::spawn(async move {
        while let Some(event) = media_rx.recv().await {
            if tx_media.send(AppEvent::Media(event)).await.is_err() {
                break;
            }
        }
    });

    let mut controller: Controller = PlayerController::new(
        config.polling.intervals(),
        source,
        media,
        tx.clone(),
        saved.volume,
    );
    let mut app = App::new(
        &config.station.name,
        config.keys.clone(),
        &saved,
        controller.backend_name(),
        Instant::now(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Animation Tick Task ⚡
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    // 3. Polling
    let now = Instant::now();
    app.apply_all(controller.start(), now);
    if config.playback.autoplay {
        app.apply_all(controller.toggle_play(), now);
    }

    let artwork = Arc::new(ArtworkRenderer::new(client, timeout));
    let result = run(&mut terminal, &mut app, &mut controller, &mut rx, &tx, &artwork).await;

    controller.dispose();
    app.persistent_state().save();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Exited with error");
    }
    info!("Bye");
    result
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    controller: &mut Controller,
    rx: &mut mpsc::Receiver<AppEvent>,
    tx: &mpsc::Sender<AppEvent>,
    artwork: &Arc<ArtworkRenderer>,
) -> Result<()> {
    let mut last_title = String::new();

    loop {
        let now = Instant::now();

        let title = app.window_title();
        if title != last_title {
            execute!(terminal.backend_mut(), SetTitle(&title))?;
            last_title = title;
        }

        terminal.draw(|f| ui::ui(f, app, now))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        let now = Instant::now();

        match event {
            AppEvent::Input(Event::Key(key)) => inputs::handle_event(key, app, controller, now),
            AppEvent::Input(_) => {}
            AppEvent::Poll(poll) => app.apply_all(controller.apply_poll(poll), now),
            AppEvent::Media(media_event) => {
                app.apply_all(controller.handle_media_event(media_event), now)
            }
            AppEvent::ArtworkUpdate(url, state) => app.set_artwork(&url, state),
            AppEvent::Tick => app.on_tick(now),
        }

        if let Some(url) = app.take_artwork_request() {
            spawn_artwork_fetch(artwork.clone(), url, tx.clone());
        }

        if app.take_prefs_dirty() {
            app.persistent_state().save();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_artwork_fetch(artwork: Arc<ArtworkRenderer>, url: String, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let state = match artwork.fetch_image(&url).await {
            Ok(img) => ArtworkState::Loaded(img),
            Err(e) => {
                warn!(url = %url, error = %e, "Cover art failed");
                ArtworkState::Failed
            }
        };
        let _ = tx.send(AppEvent::ArtworkUpdate(url, state)).await;
    });
}

/// Leave raw mode before the panic report is printed
fn restore_terminal_on_panic() {
    let report = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        report(info);
    }));
}
