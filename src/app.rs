use crate::api::ApiClient;
use crate::config::Config;
use crate::screens::{
    CallbackScreen, DashboardScreen, HomeScreen, LoginScreen, Screen, ScreenAction, ScreenContext,
};
use crate::tui::Tui;
use crate::ui::ScreenId;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing::info;

/// Main application: owns the terminal, the API client and the four screen
/// controllers, and routes events and request results between them.
///
/// Network operations requested by screens are executed on the embedded
/// tokio runtime, one at a time; a frame is drawn before each request so the
/// screen's loading state is visible while the call is in flight. Because
/// requests are serialized here, a response can never race a newer request's
/// state.
pub struct App {
    config: Config,
    api: ApiClient,
    tui: Tui,
    runtime: Runtime,
    current_screen: ScreenId,
    should_quit: bool,
    home: HomeScreen,
    login: LoginScreen,
    callback: CallbackScreen,
    dashboard: DashboardScreen,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        let tui = Tui::new()?;
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let dashboard = DashboardScreen::new(config.language);

        Ok(Self {
            config,
            api,
            tui,
            runtime,
            current_screen: ScreenId::Home,
            should_quit: false,
            home: HomeScreen::new(),
            login: LoginScreen::new(),
            callback: CallbackScreen::new(),
            dashboard,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting commitcast against {}", self.api.base_url());
        self.tui.enter()?;
        let result = self.event_loop();
        self.tui.exit()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            if self.should_quit {
                break;
            }

            // Deferred work first (the callback screen's delayed redirect),
            // then input, polled with a 250ms timeout so ticks keep firing
            // while the user is idle.
            let action = self.tick();
            self.apply_action(action)?;

            if let Some(event) = self.tui.poll_event(Duration::from_millis(250))? {
                let action = match self.current_screen {
                    ScreenId::Home => self
                        .home
                        .handle_event(event, &ScreenContext::new(&self.config))?,
                    ScreenId::Login => self
                        .login
                        .handle_event(event, &ScreenContext::new(&self.config))?,
                    ScreenId::Callback => self
                        .callback
                        .handle_event(event, &ScreenContext::new(&self.config))?,
                    ScreenId::Dashboard => self
                        .dashboard
                        .handle_event(event, &ScreenContext::new(&self.config))?,
                };
                self.apply_action(action)?;
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        match self.current_screen {
            ScreenId::Home => {
                let screen = &mut self.home;
                self.tui.draw(|frame| {
                    let area = frame.area();
                    screen.render(frame, area);
                })
            }
            ScreenId::Login => {
                let screen = &mut self.login;
                self.tui.draw(|frame| {
                    let area = frame.area();
                    screen.render(frame, area);
                })
            }
            ScreenId::Callback => {
                let screen = &mut self.callback;
                self.tui.draw(|frame| {
                    let area = frame.area();
                    screen.render(frame, area);
                })
            }
            ScreenId::Dashboard => {
                let screen = &mut self.dashboard;
                self.tui.draw(|frame| {
                    let area = frame.area();
                    screen.render(frame, area);
                })
            }
        }
    }

    fn tick(&mut self) -> ScreenAction {
        let now = Instant::now();
        match self.current_screen {
            ScreenId::Home => self.home.tick(now),
            ScreenId::Login => self.login.tick(now),
            ScreenId::Callback => self.callback.tick(now),
            ScreenId::Dashboard => self.dashboard.tick(now),
        }
    }

    /// Execute an action returned by a screen.
    ///
    /// Network actions draw a frame first (so Loading states are visible),
    /// run the request to completion on the runtime, and hand the result to
    /// the owning screen's completion method, which may itself navigate.
    fn apply_action(&mut self, action: ScreenAction) -> Result<()> {
        match action {
            ScreenAction::None => {}
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::Navigate(target) => self.navigate(target),
            ScreenAction::BeginLogin => {
                self.draw()?;
                let result = self.runtime.block_on(self.api.begin_login());
                let next = self.login.on_login_result(result);
                self.apply_action(next)?;
            }
            ScreenAction::ExchangeCallback { code, state } => {
                self.draw()?;
                let result = self
                    .runtime
                    .block_on(self.api.complete_callback(&code, &state));
                let next = self.callback.on_exchange_result(result);
                self.apply_action(next)?;
            }
            ScreenAction::GenerateDraft {
                repository,
                language,
            } => {
                self.draw()?;
                let result = self
                    .runtime
                    .block_on(self.api.generate_tweet(&repository, language));
                let next = self.dashboard.on_generate_result(result);
                self.apply_action(next)?;
            }
            ScreenAction::PublishPost { text } => {
                self.draw()?;
                let result = self.runtime.block_on(self.api.post_tweet(&text));
                let next = self.dashboard.on_publish_result(result);
                self.apply_action(next)?;
            }
        }
        Ok(())
    }

    fn navigate(&mut self, target: ScreenId) {
        if target == self.current_screen {
            return;
        }
        info!("Navigating {:?} -> {:?}", self.current_screen, target);

        let ctx = ScreenContext::new(&self.config);
        match self.current_screen {
            ScreenId::Home => self.home.on_exit(&ctx),
            ScreenId::Login => self.login.on_exit(&ctx),
            ScreenId::Callback => self.callback.on_exit(&ctx),
            ScreenId::Dashboard => self.dashboard.on_exit(&ctx),
        }

        self.current_screen = target;

        match target {
            ScreenId::Home => self.home.on_enter(&ctx),
            ScreenId::Login => self.login.on_enter(&ctx),
            ScreenId::Callback => self.callback.on_enter(&ctx),
            ScreenId::Dashboard => self.dashboard.on_enter(&ctx),
        }
    }
}
