use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    widgets::Block,
    Frame,
};
use tracing::{debug, info};

use crate::auth::AuthService;
use crate::cli::signin::SignInScreen;
use crate::cli::signup::SignUpScreen;
use crate::error::Result;
use crate::navigation::{Navigator, Route, StackNavigator};
use crate::settings::Settings;
use crate::tui::{draw_alert, parse_hex_color, Alert, Effect, Screen};

const DEFAULT_BACKGROUND: Color = Color::Rgb(0x31, 0x2e, 0x38);
const DEFAULT_ACCENT: Color = Color::Rgb(0xff, 0x90, 0x00);

/// A fresh screen for `route`. Called whenever a route is pushed.
fn mount(route: Route) -> Box<dyn Screen> {
    match route {
        Route::SignIn => Box::new(SignInScreen::new()),
        Route::SignUp => Box::new(SignUpScreen::new()),
    }
}

/// Hosts the auth screens: owns the navigation stack, one mounted screen per
/// stack entry, and the modal alert.
pub struct Router {
    nav: StackNavigator,
    mounted: Vec<Box<dyn Screen>>,
    alert: Option<Alert>,
    auth: Box<dyn AuthService>,
    background: Color,
    accent: Color,
    quit: bool,
}

impl Router {
    pub fn new(settings: &Settings, auth: Box<dyn AuthService>) -> Self {
        let nav = StackNavigator::new(Route::SignIn);
        let mounted = nav.stack().iter().map(|r| mount(*r)).collect();
        Self {
            nav,
            mounted,
            alert: None,
            auth,
            background: parse_hex_color(&settings.background).unwrap_or(DEFAULT_BACKGROUND),
            accent: parse_hex_color(&settings.accent).unwrap_or(DEFAULT_ACCENT),
            quit: false,
        }
    }

    pub fn stack(&self) -> &[Route] {
        self.nav.stack()
    }

    pub fn current(&self) -> Route {
        self.nav.current()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Bring `mounted` in line with the stack: drop screens that were popped,
    /// mount new ones for pushed routes.
    fn sync_mounted(&mut self) {
        let stack = self.nav.stack().to_vec();
        let keep = self
            .mounted
            .iter()
            .zip(&stack)
            .take_while(|(screen, route)| screen.route() == **route)
            .count();
        self.mounted.truncate(keep);
        self.mounted.extend(stack[keep..].iter().map(|r| mount(*r)));
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Alert(alert) => {
                    info!(title = %alert.title, "alert shown");
                    self.alert = Some(alert);
                }
                Effect::Navigate(route) => {
                    self.nav.navigate_to(route);
                    self.sync_mounted();
                    info!(%route, depth = self.nav.stack().len(), "navigated");
                }
                Effect::GoBack => {
                    if self.nav.go_back() {
                        self.sync_mounted();
                        info!(route = %self.nav.current(), "went back");
                    } else {
                        debug!("back pressed at root");
                    }
                }
                Effect::Quit => self.quit = true,
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.alert.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return;
        }

        let effects = if code == KeyCode::Esc {
            if self.nav.is_at_root() {
                vec![Effect::Quit]
            } else {
                vec![Effect::GoBack]
            }
        } else {
            match self.mounted.last_mut() {
                Some(screen) => screen.handle_key(code, self.auth.as_ref()),
                None => Vec::new(),
            }
        };
        self.apply(effects);
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(self.background)), area);
        if let Some(screen) = self.mounted.last_mut() {
            screen.draw(frame, area, self.accent);
        }
        if let Some(alert) = &self.alert {
            draw_alert(frame, area, alert);
        }
    }
}

/// Run the auth screens until the user quits.
pub fn run(settings: &Settings, auth: Box<dyn AuthService>) -> Result<()> {
    let mut router = Router::new(settings, auth);

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    info!(route = %router.current(), "navigator started");

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| router.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                router.handle_key(key.code);
                if router.should_quit() {
                    break Ok(());
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    info!(depth = router.stack().len(), "navigator closed");
    result
}
