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
use crate::models::SignUpRecord;
use crate::navigation::Route;
use crate::tui::{centered_column, Alert, Effect, Screen, FOOTER_STYLE, FORM_WIDTH, HEADER_STYLE};
use crate::validation::{get_validation_errors, sign_up_schema};

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        icon: Icon::User,
        placeholder: "Name",
        capitalize: Capitalize::Words,
        secure: false,
        return_key: ReturnKey::Next,
    },
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

const BUTTONS: &[&str] = &["Register", "Back to sign in"];
const BUTTON_SUBMIT: usize = 0;
const BUTTON_BACK: usize = 1;

pub struct SignUpScreen {
    form: FormState,
}

impl Default for SignUpScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignUpScreen {
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
            FormEvent::Button(BUTTON_BACK) => vec![Effect::GoBack],
            FormEvent::Button(idx) => {
                debug!(idx, "no action for sign-up button");
                Vec::new()
            }
        }
    }

    fn collect(&self) -> SignUpRecord {
        SignUpRecord::new(
            self.form.value("name"),
            self.form.value("email"),
            self.form.value("password"),
        )
    }

    /// Validate `record` and register it. On success the confirmation alert
    /// comes before the navigation back to sign-in.
    pub fn submit(&mut self, record: &SignUpRecord, auth: &dyn AuthService) -> Vec<Effect> {
        self.form.clear_errors();
        match try_register(record, auth) {
            Ok(()) => {
                info!("registration succeeded");
                vec![
                    Effect::Alert(Alert::new("Registration complete!", "You can now sign in.")),
                    Effect::Navigate(Route::SignIn),
                ]
            }
            Err(SubmitError::Validation(failure)) => {
                debug!(violations = failure.violations.len(), "sign-up form invalid");
                self.form.set_errors(&get_validation_errors(&failure));
                Vec::new()
            }
            Err(SubmitError::Unexpected(e)) => {
                warn!("registration failed: {e}");
                vec![Effect::Alert(Alert::new(
                    "Registration error",
                    "Something went wrong while registering, please try again.",
                ))]
            }
        }
    }
}

fn try_register(record: &SignUpRecord, auth: &dyn AuthService) -> Result<(), SubmitError> {
    sign_up_schema().validate(record)?;
    auth.register(record)?;
    Ok(())
}

impl Screen for SignUpScreen {
    fn route(&self) -> Route {
        Route::SignUp
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, accent: Color) {
        let column = centered_column(area, FORM_WIDTH);
        let [_top, title_area, _gap, fields_area, submit_area, _bottom, back_area, hints_area] =
            Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(self.form.fields_height()),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(column);

        frame.render_widget(
            Paragraph::new(Span::styled("Create your account", HEADER_STYLE))
                .alignment(Alignment::Center),
            title_area,
        );
        self.form.draw_fields(frame, fields_area, accent);
        for (idx, slot) in [(BUTTON_SUBMIT, submit_area), (BUTTON_BACK, back_area)] {
            frame.render_widget(
                Paragraph::new(self.form.button_line(idx, accent)).alignment(Alignment::Center),
                slot,
            );
        }
        frame.render_widget(
            Paragraph::new("Tab=next  Enter=select  Esc=back")
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
