//! Application state and core logic

use crate::api::RegistrationApi;
use crate::config::TuiConfig;
use crate::registration::{RegistrationSession, SubmissionPhase, SubmitAttempt};
use crate::state::{Form, FormVariant};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Window for the second Ctrl+C of a double-tap quit
const CTRL_C_WINDOW: Duration = Duration::from_millis(1000);

/// Status bar text while a submission is in flight
const SUBMITTING_STATUS: &str = "Submitting...";

/// Main application struct
pub struct App {
    /// The mounted registration form and its background work
    pub session: RegistrationSession,
    /// API base URL, shown in the status bar
    pub api_base_url: String,
    /// Whether the app should quit
    quit: bool,
    /// One-line hint shown in the status bar
    pub status_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App and start loading the configured form.
    /// Must be called inside a tokio runtime.
    pub fn new(api: Arc<dyn RegistrationApi>, config: &TuiConfig, api_base_url: String) -> Self {
        let variant = config.variant();
        let mut session = RegistrationSession::new(api, variant, config.toast_duration());
        session.mount(variant);

        Self {
            session,
            api_base_url,
            quit: false,
            status_message: None,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply finished background work and expire old toasts
    pub fn tick(&mut self) {
        self.session.poll_events();
        self.session.notifications.prune_expired(Instant::now());

        // The outcome is reported by a toast
        if self.session.phase() == SubmissionPhase::Idle
            && self.status_message.as_deref() == Some(SUBMITTING_STATUS)
        {
            self.status_message = None;
        }
    }

    /// Switch to another form variant, reloading its reference lists
    pub fn switch_variant(&mut self, variant: FormVariant) {
        if variant == self.session.variant() {
            return;
        }
        tracing::info!("Switching to {} form", variant.title());
        self.session.mount(variant);
        self.status_message = None;
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return Ok(());
        }
        self.last_ctrl_c = None;

        match key.code {
            KeyCode::F(n) => {
                if let Some(variant) = FormVariant::from_index(usize::from(n).saturating_sub(1)) {
                    self.switch_variant(variant);
                }
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit();
            }
            KeyCode::Tab | KeyCode::Down => self.session.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.session.form.prev_field(),
            KeyCode::Right => self.session.form.select_next(),
            KeyCode::Left => self.session.form.select_prev(),
            KeyCode::Enter if self.session.form.is_submit_row_active() => self.submit(),
            KeyCode::Enter => self.session.form.next_field(),
            KeyCode::Esc => {
                self.session.form.reset();
                self.status_message = Some("Form cleared".to_string());
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.session.form.input_char(c)
            }
            KeyCode::Backspace => self.session.form.backspace(),
            _ => {}
        }
        Ok(())
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(previous) if now.duration_since(previous) <= CTRL_C_WINDOW => {
                self.quit = true;
            }
            _ => {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    fn submit(&mut self) {
        self.status_message = match self.session.submit() {
            SubmitAttempt::Started => Some(SUBMITTING_STATUS.to_string()),
            SubmitAttempt::Invalid { errors: 1 } => Some("Please fix the highlighted field".to_string()),
            SubmitAttempt::Invalid { errors } => {
                Some(format!("Please fix the {errors} highlighted fields"))
            }
            SubmitAttempt::AlreadySubmitting | SubmitAttempt::Malformed => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockRegistrationApi};
    use crate::state::{FieldName, NotificationKind, ReferenceOption, Resource};
    use mockall::predicate::eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn mock_with_options() -> MockRegistrationApi {
        let mut mock = MockRegistrationApi::new();
        mock.expect_list_options()
            .with(eq(Resource::Countries))
            .returning(|_| Ok(vec![ReferenceOption::new(3, "Kyrgyzstan")]));
        mock.expect_list_options()
            .with(eq(Resource::Roles))
            .returning(|_| Ok(vec![ReferenceOption::new(2, "Team Leader")]));
        mock.expect_list_options()
            .with(eq(Resource::Subjects))
            .returning(|_| Ok(vec![ReferenceOption::new(5, "Physics")]));
        mock
    }

    async fn app_with(mock: MockRegistrationApi) -> App {
        let mut app = App::new(
            Arc::new(mock),
            &TuiConfig::default(),
            "http://localhost:8000/".to_string(),
        );
        app.session.settle().await;
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            tokio_test::assert_ok!(app.handle_key(key(KeyCode::Char(c))));
        }
    }

    mod quitting {
        use super::*;

        #[tokio::test]
        async fn test_should_quit_initially_false() {
            let app = app_with(mock_with_options()).await;
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_double_ctrl_c_quits() {
            let mut app = app_with(mock_with_options()).await;
            app.handle_key(ctrl('c')).unwrap();
            assert!(!app.should_quit());
            app.handle_key(ctrl('c')).unwrap();
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_other_key_between_ctrl_c_resets() {
            let mut app = app_with(mock_with_options()).await;
            app.handle_key(ctrl('c')).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(ctrl('c')).unwrap();
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_stale_ctrl_c_does_not_quit() {
            let mut app = app_with(mock_with_options()).await;
            app.last_ctrl_c = Some(Instant::now() - Duration::from_secs(5));
            app.handle_key(ctrl('c')).unwrap();
            assert!(!app.should_quit());
        }
    }

    mod editing {
        use super::*;

        #[tokio::test]
        async fn test_typing_fills_active_field() {
            let mut app = app_with(mock_with_options()).await;
            type_text(&mut app, "Aziza");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.session.form.values().full_name, "Aziz");
        }

        #[tokio::test]
        async fn test_arrows_select_loaded_option() {
            let mut app = app_with(mock_with_options()).await;
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.session.form.values().country, "3");
        }

        #[tokio::test]
        async fn test_enter_advances_until_submit_row() {
            let mut app = app_with(mock_with_options()).await;
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.session.form.active_field(), 1);
            app.handle_key(key(KeyCode::Up)).unwrap();
            app.handle_key(key(KeyCode::Up)).unwrap();
            assert!(app.session.form.is_submit_row_active());
        }

        #[tokio::test]
        async fn test_modified_letters_are_not_typed() {
            let mut app = app_with(mock_with_options()).await;
            type_text(&mut app, "Bo");
            app.handle_key(ctrl('a')).unwrap();
            app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT))
                .unwrap();
            app.handle_key(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT))
                .unwrap();
            assert_eq!(app.session.form.values().full_name, "BoB");
        }

        #[tokio::test]
        async fn test_esc_clears_form() {
            let mut app = app_with(mock_with_options()).await;
            type_text(&mut app, "Aziza");
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.session.form.values().full_name, "");
        }
    }

    mod variants {
        use super::*;

        #[tokio::test]
        async fn test_function_keys_switch_variant() {
            let mut app = app_with(mock_with_options()).await;
            app.handle_key(key(KeyCode::F(2))).unwrap();
            assert_eq!(app.session.variant(), FormVariant::Subject);
            app.session.settle().await;
            assert_eq!(
                app.session.form.field(FieldName::Subject).unwrap().options()[0].label,
                "Physics"
            );

            app.handle_key(key(KeyCode::F(3))).unwrap();
            assert_eq!(app.session.variant(), FormVariant::Guest);
        }

        #[tokio::test]
        async fn test_unknown_function_key_is_ignored() {
            let mut app = app_with(mock_with_options()).await;
            app.handle_key(key(KeyCode::F(9))).unwrap();
            assert_eq!(app.session.variant(), FormVariant::Delegation);
        }

        #[tokio::test]
        async fn test_same_variant_keeps_entered_values() {
            let mut app = app_with(mock_with_options()).await;
            type_text(&mut app, "Aziza");
            app.handle_key(key(KeyCode::F(1))).unwrap();
            assert_eq!(app.session.form.values().full_name, "Aziza");
        }
    }

    mod submitting {
        use super::*;

        #[tokio::test]
        async fn test_ctrl_s_on_empty_form_reports_errors() {
            let mut mock = mock_with_options();
            mock.expect_submit().times(0);
            let mut app = app_with(mock).await;

            app.handle_key(ctrl('s')).unwrap();
            assert_eq!(
                app.status_message.as_deref(),
                Some("Please fix the 7 highlighted fields")
            );
            assert!(app.session.form.error_for(FieldName::FullName).is_some());
        }

        /// Fill the delegation form from the keyboard and land on the submit row
        fn fill_by_keyboard(app: &mut App) {
            type_text(app, "Aziza Karimova");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap(); // country
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap(); // role
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(app, "aziza@example.uz");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(app, "+998901234567");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Left)).unwrap(); // students: 4
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap(); // team leaders: 0
            app.handle_key(key(KeyCode::Tab)).unwrap();
        }

        #[tokio::test]
        async fn test_keyboard_driven_submission() {
            let mut mock = mock_with_options();
            mock.expect_submit().times(1).returning(|_| Ok(()));
            let mut app = app_with(mock).await;

            fill_by_keyboard(&mut app);
            assert!(app.session.form.is_submit_row_active());

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.status_message.as_deref(), Some("Submitting..."));
            app.session.settle().await;
            app.tick();

            assert_eq!(
                app.session.notifications.latest().unwrap().kind,
                NotificationKind::Success
            );
            assert_eq!(app.session.form.values().full_name, "");
            assert_eq!(app.status_message, None);
        }

        #[tokio::test]
        async fn test_failed_submission_clears_submitting_status() {
            let mut mock = mock_with_options();
            mock.expect_submit()
                .times(1)
                .returning(|_| Err(ApiError::Transport("connection refused".into())));
            let mut app = app_with(mock).await;

            fill_by_keyboard(&mut app);
            app.handle_key(ctrl('s')).unwrap();
            assert_eq!(app.status_message.as_deref(), Some("Submitting..."));
            app.session.settle().await;
            app.tick();

            assert_eq!(app.status_message, None);
            assert_eq!(
                app.session.notifications.latest().unwrap().kind,
                NotificationKind::Error
            );
            // Entered values stay for another try
            assert_eq!(app.session.form.values().full_name, "Aziza Karimova");
        }
    }
}
