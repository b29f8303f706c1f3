//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::auth::UserSession;
use crate::consts::cli_consts::{SPLASH_DURATION_SECS, UI_TICK_MS};
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::runtime::LiveFeeds;
use crate::ui::dashboard::{DashboardAction, DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::dispatcher::{ActionDispatcher, Dispatch};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The live donation dashboard.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The signed-in user, if any.
    user: Option<UserSession>,

    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from feed subscriptions and actions.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Running feed subscriptions, re-created on retry and reload.
    feeds: LiveFeeds,

    /// Starts claim and create actions.
    dispatcher: ActionDispatcher,

    /// Claims and creations still running.
    in_flight: Vec<Dispatch>,

    /// Events received while the splash screen is up.
    splash_backlog: Vec<WorkerEvent>,

    /// Whether to paint a background color
    with_background_color: bool,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        user: Option<UserSession>,
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        shutdown_sender: broadcast::Sender<()>,
        feeds: LiveFeeds,
        dispatcher: ActionDispatcher,
        with_background_color: bool,
    ) -> Self {
        Self {
            user,
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            shutdown_sender,
            feeds,
            dispatcher,
            in_flight: Vec::new(),
            splash_backlog: Vec::new(),
            with_background_color,
        }
    }

    fn show_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.user.clone(),
            self.environment.clone(),
            self.with_background_color,
        );
        for event in self.splash_backlog.drain(..) {
            state.add_event(event);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Carries out an action requested by the dashboard. Returns false on quit.
    fn perform(&mut self, action: DashboardAction) -> bool {
        let dispatch = match action {
            DashboardAction::Claim(donation_id) => {
                self.dispatcher.claim(&donation_id, self.user.as_ref())
            }
            DashboardAction::Create { request_id, draft } => {
                self.dispatcher.create(request_id, draft, self.user.as_ref())
            }
            DashboardAction::Retry(feeds) => {
                for feed in feeds {
                    self.feeds.resubscribe(feed);
                }
                return true;
            }
            DashboardAction::ReloadAll => {
                self.feeds.reload_all();
                return true;
            }
            DashboardAction::Quit => return false,
        };
        if !dispatch.is_rejected() {
            self.in_flight.push(dispatch);
        }
        true
    }

    /// Stops the feeds and lets running actions deliver their outcome.
    async fn shutdown(mut self) {
        let _ = self.shutdown_sender.send(());
        self.feeds.stop().await;
        for dispatch in self.in_flight.drain(..) {
            dispatch.finished().await;
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(SPLASH_DURATION_SECS);

    loop {
        // Queue all incoming events; snapshots that arrive during the splash
        // are kept so the dashboard opens with the latest state.
        while let Ok(event) = app.event_receiver.try_recv() {
            match &mut app.current_screen {
                Screen::Dashboard(state) => state.add_event(event),
                Screen::Splash => app.splash_backlog.push(event),
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        app.in_flight.retain(|dispatch| !dispatch.is_finished());
        terminal.draw(|f| render(f, &app.current_screen))?;

        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.show_dashboard();
                continue;
            }
        }

        if event::poll(Duration::from_millis(UI_TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                let keep_running = match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            false
                        } else {
                            // Any other key skips the splash screen
                            app.show_dashboard();
                            true
                        }
                    }
                    Screen::Dashboard(state) => match state.handle_key(key) {
                        Some(action) => app.perform(action),
                        None => true,
                    },
                };

                if !keep_running {
                    app.shutdown().await;
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
