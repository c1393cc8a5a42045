use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Color,
    text::Span,
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, warn};

use crate::auth::AuthService;
use crate::error::SubmitError;
use crate::form::{Capitalize, FieldSpec, FormEvent, FormState, Icon, ReturnKey};
use crate::models::SignInRecord;
use crate::navigation::Route;
use crate::tui::{centered_column, Alert, Effect, Screen, FOOTER_STYLE, FORM_WIDTH, HEADER_STYLE};
use crate::validation::{get_validation_errors, sign_in_schema};

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "email",
        icon: Icon::Mail,
        placeholder: "E-mail",
        capitalize: Capitalize::None,
        secure: false,
        return_key: ReturnKey::Next,
    },
    FieldSpec {
        name: "password",
        icon: Icon::Lock,
        placeholder: "Password",
        capitalize: Capitalize::None,
        secure: true,
        return_key: ReturnKey::Send,
    },
];

const BUTTONS: &[&str] = &["Sign in", "Forgot my password", "Create an account"];
const BUTTON_SUBMIT: usize = 0;
const BUTTON_FORGOT: usize = 1;
const BUTTON_CREATE: usize = 2;

pub struct SignInScreen {
    form: FormState,
}

impl Default for SignInScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInScreen {
    pub fn new() -> Self {
        Self {
            form: FormState::new(FIELDS, BUTTONS),
        }
    }

    fn on_event(&mut self, event: FormEvent, auth: &dyn AuthService) -> Vec<Effect> {
        match event {
            FormEvent::Continue => Vec::new(),
            FormEvent::Submit | FormEvent::Button(BUTTON_SUBMIT) => {
                let record = self.collect();
                self.submit(&record, auth)
            }
            FormEvent::Button(BUTTON_CREATE) => vec![Effect::Navigate(Route::SignUp)],
            FormEvent::Button(BUTTON_FORGOT) => {
                debug!("password recovery is not available");
                Vec::new()
            }
            FormEvent::Button(idx) => {
                debug!(idx, "no action for sign-in button");
                Vec::new()
            }
        }
    }

    fn collect(&self) -> SignInRecord {
        SignInRecord::new(self.form.value("email"), self.form.value("password"))
    }

    /// Validate `record` and sign in with it. Field errors land on the form;
    /// anything else becomes an alert.
    pub fn submit(&mut self, record: &SignInRecord, auth: &dyn AuthService) -> Vec<Effect> {
        self.form.clear_errors();
        match try_sign_in(record, auth) {
            Ok(()) => {
                info!("sign-in succeeded");
                Vec::new()
            }
            Err(SubmitError::Validation(failure)) => {
                debug!(violations = failure.violations.len(), "sign-in form invalid");
                self.form.set_errors(&get_validation_errors(&failure));
                Vec::new()
            }
            Err(SubmitError::Unexpected(e)) => {
                warn!("sign-in failed: {e}");
                vec![Effect::Alert(Alert::new(
                    "Authentication error",
                    "Something went wrong while signing in.",
                ))]
            }
        }
    }
}

fn try_sign_in(record: &SignInRecord, auth: &dyn AuthService) -> Result<(), SubmitError> {
    sign_in_schema().validate(record)?;
    auth.sign_in(record)?;
    Ok(())
}

impl Screen for SignInScreen {
    fn route(&self) -> Route {
        Route::SignIn
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, accent: Color) {
        let column = centered_column(area, FORM_WIDTH);
        let [_top, title_area, _gap1, fields_area, submit_area, _gap2, forgot_area, _bottom, create_area, hints_area] =
            Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(self.form.fields_height()),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(column);

        frame.render_widget(
            Paragraph::new(Span::styled("Sign in to your account", HEADER_STYLE))
                .alignment(Alignment::Center),
            title_area,
        );
        self.form.draw_fields(frame, fields_area, accent);
        for (idx, slot) in [(BUTTON_SUBMIT, submit_area), (BUTTON_FORGOT, forgot_area), (BUTTON_CREATE, create_area)] {
            frame.render_widget(
                Paragraph::new(self.form.button_line(idx, accent)).alignment(Alignment::Center),
                slot,
            );
        }
        frame.render_widget(
            Paragraph::new("Tab=next  Enter=select  Esc=quit")
                .style(FOOTER_STYLE)
                .alignment(Alignment::Center),
            hints_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode, auth: &dyn AuthService) -> Vec<Effect> {
        let event = self.form.handle_key(code);
        self.on_event(event, auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::CountingAuth;
    use crate::tui::testing;

    fn submit(email: &str, password: &str, auth: &CountingAuth) -> (SignInScreen, Vec<Effect>) {
        let mut screen = SignInScreen::new();
        let effects = screen.submit(&SignInRecord::new(email, password), auth);
        (screen, effects)
    }

    #[test]
    fn valid_record_signs_in_once() {
        let auth = CountingAuth::default();
        let (screen, effects) = submit("a@b.com", "x", &auth);
        assert!(effects.is_empty());
        assert!(screen.form.errors().is_empty());
        assert_eq!(auth.sign_ins.get(), 1);
    }

    #[test]
    fn empty_record_flags_both_fields() {
        let auth = CountingAuth::default();
        let (screen, effects) = submit("", "", &auth);
        let errors = screen.form.errors();
        assert_eq!(errors.len(), 2);
        assert!(!errors["email"].is_empty());
        assert!(!errors["password"].is_empty());
        assert!(effects.is_empty());
        assert_eq!(auth.sign_ins.get(), 0);
    }

    #[test]
    fn invalid_emails_are_flagged_without_signing_in() {
        let auth = CountingAuth::default();
        for email in ["", "ana", "ana@", "@x.com", "ana@x", "ana x@y.com"] {
            let (screen, _) = submit(email, "secret", &auth);
            assert!(screen.form.error("email").is_some(), "{email:?} should be rejected");
        }
        assert_eq!(auth.sign_ins.get(), 0);
    }

    #[test]
    fn empty_password_is_flagged() {
        let auth = CountingAuth::default();
        let (screen, _) = submit("a@b.com", "", &auth);
        assert_eq!(screen.form.error("password"), Some("Password is required."));
        assert_eq!(screen.form.error("email"), None);
    }

    #[test]
    fn second_attempt_replaces_first_attempt_errors() {
        let auth = CountingAuth::default();
        let mut screen = SignInScreen::new();
        screen.submit(&SignInRecord::new("", ""), &auth);
        assert_eq!(screen.form.errors().len(), 2);
        screen.submit(&SignInRecord::new("a@b.com", ""), &auth);
        let errors = screen.form.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("password"));
    }

    #[test]
    fn success_clears_earlier_errors() {
        let auth = CountingAuth::default();
        let mut screen = SignInScreen::new();
        screen.submit(&SignInRecord::new("", ""), &auth);
        screen.submit(&SignInRecord::new("a@b.com", "x"), &auth);
        assert!(screen.form.errors().is_empty());
    }

    #[test]
    fn service_failure_raises_generic_alert() {
        let auth = CountingAuth::failing();
        let (screen, effects) = submit("a@b.com", "x", &auth);
        assert_eq!(
            effects,
            vec![Effect::Alert(Alert::new(
                "Authentication error",
                "Something went wrong while signing in."
            ))]
        );
        assert!(screen.form.errors().is_empty());
    }

    #[test]
    fn enter_on_password_submits_form_values() {
        let auth = CountingAuth::default();
        let mut screen = SignInScreen::new();
        for c in "a@b.com".chars() {
            screen.handle_key(KeyCode::Char(c), &auth);
        }
        screen.handle_key(KeyCode::Enter, &auth);
        assert_eq!(screen.form.focused(), 1);
        screen.handle_key(KeyCode::Char('x'), &auth);
        let effects = screen.handle_key(KeyCode::Enter, &auth);
        assert!(effects.is_empty());
        assert_eq!(auth.sign_ins.get(), 1);
    }

    #[test]
    fn create_account_navigates_to_sign_up() {
        let auth = CountingAuth::default();
        let mut screen = SignInScreen::new();
        screen.form.focus(FIELDS.len() + BUTTON_CREATE);
        let effects = screen.handle_key(KeyCode::Enter, &auth);
        assert_eq!(effects, vec![Effect::Navigate(Route::SignUp)]);
        assert_eq!(auth.sign_ins.get(), 0);
    }

    #[test]
    fn forgot_password_does_nothing() {
        let auth = CountingAuth::default();
        let mut screen = SignInScreen::new();
        screen.form.focus(FIELDS.len() + BUTTON_FORGOT);
        assert!(screen.handle_key(KeyCode::Enter, &auth).is_empty());
        assert!(screen.form.errors().is_empty());
    }

    #[test]
    fn unknown_button_is_ignored() {
        let auth = CountingAuth::default();
        let mut screen = SignInScreen::new();
        assert!(screen.on_event(FormEvent::Button(BUTTONS.len()), &auth).is_empty());
        assert_eq!(auth.sign_ins.get(), 0);
    }

    #[test]
    fn draws_title_fields_and_links() {
        let mut screen = SignInScreen::new();
        let rows = testing::render(70, 24, |f| screen.draw(f, f.area(), Color::Yellow));
        assert!(testing::contains(&rows, "Sign in to your account"));
        assert!(testing::contains(&rows, "[ Sign in ]"));
        assert!(testing::contains(&rows, "[ Forgot my password ]"));
        assert!(testing::contains(&rows, "[ Create an account ]"));
        assert!(testing::contains(&rows, "Password"));
    }
}
