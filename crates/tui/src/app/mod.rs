mod state;

use std::time::{Duration, Instant};

use api_types::{
    auth::UserView,
    expense::{ExpenseListQuery, ExpenseNew},
    settings::UserSettingsUpdate,
};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::{
    client::{Client, ClientError, LIST_LIMIT},
    config::AppConfig,
    error::{AppError, Result},
    local_state::LocalState,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use state::{
    AppState, ExpenseForm, FormField, Overlay, ReportTab, Screen, Section,
    SettingsField, ToastLevel, ToastState, amount_of, expense_date, format_date,
};

pub struct App {
    config: AppConfig,
    client: Client,
    local: LocalState,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let tz = config.tz()?;
        let local = LocalState::load(&config.state_path)?;

        let mut state = AppState::new(&config.base_url, tz);
        let (currency, theme) = state::resolve_preferences(&local, None);
        state.apply_preferences(currency, theme);

        Ok(Self {
            config,
            client,
            local,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.restore_session().await;

        while !self.should_quit {
            if self
                .state
                .toast
                .as_ref()
                .is_some_and(|toast| toast.expired(Instant::now()))
            {
                self.state.toast = None;
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key).await;
                    }
                    Event::Paste(text) => self.handle_paste(&text),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn save_local(&mut self) {
        if let Err(err) = self.local.save(&self.config.state_path) {
            tracing::warn!("failed to save local state: {err}");
            self.state
                .notify(format!("Could not save preferences: {err}"), ToastLevel::Error);
        }
    }

    /// Stored session first, then a token handed over by flag or env.
    async fn restore_session(&mut self) {
        if let Some(token) = self.local.access_token.clone() {
            self.client.set_token(token);
            match self.client.me().await {
                Ok(user) => {
                    self.enter_main(user).await;
                    return;
                }
                Err(ClientError::Unauthorized) => {
                    self.client.clear_token();
                    self.local.clear_session();
                    self.save_local();
                }
                Err(err) => {
                    self.client.clear_token();
                    self.state.sign_in.message = Some(err.message());
                    return;
                }
            }
        }

        if let Some(id_token) = self.config.id_token.clone() {
            self.state.sign_in.input = id_token;
            self.submit_sign_in().await;
        }
    }

    async fn submit_sign_in(&mut self) {
        let Some(id_token) = self.state.sign_in.take_submission() else {
            return;
        };

        match self.client.google(&id_token).await {
            Ok(auth) => {
                self.state.sign_in.finish(None);
                self.client.set_token(auth.access_token.clone());
                self.local.access_token = Some(auth.access_token);
                self.save_local();
                self.enter_main(auth.user).await;
            }
            Err(err) => {
                let message = match err {
                    ClientError::Unauthorized => "Google sign-in was rejected".to_string(),
                    other => other.message(),
                };
                self.state.sign_in.finish(Some(message));
            }
        }
    }

    async fn enter_main(&mut self, user: UserView) {
        self.state.user = Some(user);
        self.state.screen = Screen::Main;
        self.state.section = Section::Expenses;
        self.load_settings().await;
        self.load_expenses().await;
    }

    /// Routes a failed call: a 401 ends the session, anything else is
    /// returned as a message for the caller to show.
    fn client_failure(&mut self, err: ClientError) -> Option<String> {
        if let ClientError::Unauthorized = err {
            self.client.clear_token();
            self.local.clear_session();
            self.save_local();
            self.state.sign_out(Some(err.message()));
            return None;
        }
        Some(err.message())
    }

    fn toast_failure(&mut self, err: ClientError) {
        if let Some(message) = self.client_failure(err) {
            self.state.notify(message, ToastLevel::Error);
        }
    }

    async fn load_settings(&mut self) {
        match self.client.settings().await {
            Ok(remote) => {
                let (currency, theme) = state::resolve_preferences(&self.local, Some(&remote));
                self.state.apply_preferences(currency, theme);
            }
            Err(err) => {
                if let Some(message) = self.client_failure(err) {
                    tracing::debug!("settings unavailable: {message}");
                }
            }
        }
    }

    async fn load_expenses(&mut self) {
        let query = ExpenseListQuery {
            skip: Some(0),
            limit: Some(LIST_LIMIT),
        };
        match self.client.list_expenses(query).await {
            Ok(items) => self.state.expenses.set_items(items),
            Err(err) => {
                if let Some(message) = self.client_failure(err) {
                    self.state.expenses.error = Some(message);
                }
            }
        }
    }

    async fn load_reports(&mut self) {
        let (summary, categories, monthly) = tokio::join!(
            self.client.summary(),
            self.client.categories(),
            self.client.monthly()
        );
        match (summary, categories, monthly) {
            (Ok(summary), Ok(categories), Ok(monthly)) => {
                self.state.reports.set(summary, categories, monthly);
            }
            (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                if let Some(message) = self.client_failure(err) {
                    self.state.reports.error = Some(message);
                }
            }
        }
    }

    /// Expenses changed: reload the list and mark reports stale.
    async fn expenses_changed(&mut self) {
        self.state.reports.invalidate();
        self.load_expenses().await;
        if self.state.section == Section::Reports {
            self.load_reports().await;
        }
    }

    async fn switch_section(&mut self, section: Section) {
        self.state.section = section;
        if section == Section::Reports && !self.state.reports.loaded {
            self.load_reports().await;
        }
        if section == Section::Settings {
            self.state.settings.currency = self.state.currency;
            self.state.settings.theme = self.state.theme;
            self.state.settings.message = None;
        }
    }

    fn handle_paste(&mut self, text: &str) {
        match self.state.screen {
            Screen::SignIn => self.state.sign_in.paste(text),
            Screen::Main => {
                if let Overlay::Form(form) = &mut self.state.overlay {
                    form.paste(text);
                }
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.screen {
            Screen::SignIn => self.handle_sign_in_key(action).await,
            Screen::Main => {
                if matches!(self.state.overlay, Overlay::None) {
                    self.handle_main_key(action).await;
                } else {
                    self.handle_overlay_key(action).await;
                }
            }
        }
    }

    async fn handle_sign_in_key(&mut self, action: AppAction) {
        match action {
            AppAction::Submit => self.submit_sign_in().await,
            AppAction::Backspace => {
                self.state.sign_in.input.pop();
            }
            AppAction::Cancel => {
                if self.state.sign_in.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.state.sign_in.input.clear();
                }
            }
            AppAction::Input(ch) if !ch.is_whitespace() => self.state.sign_in.input.push(ch),
            _ => {}
        }
    }

    async fn handle_main_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField => {
                let next = self.state.section.next();
                self.switch_section(next).await;
                return;
            }
            AppAction::Input(ch) => {
                if let Some(section) = Section::from_digit(ch) {
                    self.switch_section(section).await;
                    return;
                }
                match ch {
                    'q' => {
                        self.should_quit = true;
                        return;
                    }
                    'L' => {
                        self.logout().await;
                        return;
                    }
                    _ => {}
                }
            }
            _ => {}
        }

        match self.state.section {
            Section::Expenses => self.handle_expenses_key(action).await,
            Section::Reports => self.handle_reports_key(action).await,
            Section::Settings => self.handle_settings_key(action).await,
        }
    }

    async fn handle_expenses_key(&mut self, action: AppAction) {
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.expenses.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.state.expenses.select_next(),
            AppAction::Submit => {
                if self.state.expenses.selected_expense().is_some() {
                    self.state.overlay = Overlay::Details;
                }
            }
            AppAction::Input('a') => {
                self.state.overlay = Overlay::Form(ExpenseForm::new(self.state.today()));
            }
            AppAction::Input('S') => self.seed().await,
            AppAction::Input('C') => {
                if !self.state.expenses.items.is_empty() {
                    self.state.overlay = Overlay::ConfirmClear;
                }
            }
            AppAction::Input('R') | AppAction::Input('r') => self.load_expenses().await,
            _ => {}
        }
    }

    async fn handle_reports_key(&mut self, action: AppAction) {
        match action {
            AppAction::Left | AppAction::Input('h') => {
                self.state.reports.tab = self.state.reports.tab.prev();
            }
            AppAction::Right | AppAction::Input('l') => {
                self.state.reports.tab = self.state.reports.tab.next();
            }
            AppAction::Input('r') | AppAction::Input('R') => self.load_reports().await,
            _ => {}
        }
    }

    async fn handle_settings_key(&mut self, action: AppAction) {
        match action {
            AppAction::Up | AppAction::Down | AppAction::Input('j') | AppAction::Input('k') => {
                self.state.settings.toggle_focus();
            }
            AppAction::Left | AppAction::Input('h') => self.state.settings.cycle(false),
            AppAction::Right | AppAction::Input('l') => self.state.settings.cycle(true),
            AppAction::Submit => self.save_settings().await,
            AppAction::Cancel => {
                self.state.settings.currency = self.state.currency;
                self.state.settings.theme = self.state.theme;
                self.state.settings.message = None;
            }
            _ => {}
        }
    }

    async fn handle_overlay_key(&mut self, action: AppAction) {
        let overlay = std::mem::replace(&mut self.state.overlay, Overlay::None);
        match overlay {
            Overlay::None => {}
            Overlay::Form(mut form) => {
                match action {
                    AppAction::Cancel => return,
                    AppAction::NextField => form.next_field(),
                    AppAction::PrevField => form.prev_field(),
                    AppAction::Left => form.cycle_category(false),
                    AppAction::Right => form.cycle_category(true),
                    AppAction::Backspace => form.backspace(),
                    AppAction::Input(ch) => {
                        if form.focus == FormField::Category && ch == ' ' {
                            form.cycle_category(true);
                        } else {
                            form.push(ch);
                        }
                    }
                    AppAction::Submit => match form.to_payload() {
                        Ok(payload) => {
                            if let Some(form) = self.submit_form(form.editing, payload, form).await {
                                self.state.overlay = Overlay::Form(form);
                            }
                            return;
                        }
                        Err(message) => form.error = Some(message),
                    },
                    _ => {}
                }
                self.state.overlay = Overlay::Form(form);
            }
            Overlay::Details => match action {
                AppAction::Cancel | AppAction::Input('q') | AppAction::Input('b') => {}
                AppAction::Input('e') => {
                    if let Some(expense) = self.state.expenses.selected_expense() {
                        self.state.overlay =
                            Overlay::Form(ExpenseForm::from_expense(expense, self.state.tz));
                    }
                }
                AppAction::Input('d') => {
                    if let Some(expense) = self.state.expenses.selected_expense() {
                        self.state.overlay = Overlay::ConfirmDelete(expense.id);
                    }
                }
                _ => self.state.overlay = Overlay::Details,
            },
            Overlay::ConfirmClear => match action {
                AppAction::Input('y') | AppAction::Input('Y') | AppAction::Submit => {
                    self.clear().await;
                }
                AppAction::Cancel | AppAction::Input('n') | AppAction::Input('N') => {}
                _ => self.state.overlay = Overlay::ConfirmClear,
            },
            Overlay::ConfirmDelete(id) => match action {
                AppAction::Input('y') | AppAction::Input('Y') | AppAction::Submit => {
                    self.delete(id).await;
                }
                AppAction::Cancel | AppAction::Input('n') | AppAction::Input('N') => {
                    self.state.overlay = Overlay::Details;
                }
                _ => self.state.overlay = Overlay::ConfirmDelete(id),
            },
        }
    }

    /// Sends the form. Gives the form back when it should stay open.
    async fn submit_form(
        &mut self,
        editing: Option<i64>,
        payload: ExpenseNew,
        mut form: ExpenseForm,
    ) -> Option<ExpenseForm> {
        let result = match editing {
            Some(id) => self.client.update_expense(id, &payload).await,
            None => self.client.create_expense(&payload).await,
        };

        match result {
            Ok(expense) => {
                let verb = if editing.is_some() { "Updated" } else { "Added" };
                self.state
                    .notify(format!("{verb} {}", expense.title), ToastLevel::Success);
                self.expenses_changed().await;
                if let Some(idx) = self
                    .state
                    .expenses
                    .items
                    .iter()
                    .position(|item| item.id == expense.id)
                {
                    self.state.expenses.selected = idx;
                }
                None
            }
            Err(err) => {
                let message = self.client_failure(err)?;
                form.error = Some(message);
                Some(form)
            }
        }
    }

    async fn delete(&mut self, id: i64) {
        match self.client.delete_expense(id).await {
            Ok(expense) => {
                self.state
                    .notify(format!("Deleted {}", expense.title), ToastLevel::Success);
                self.expenses_changed().await;
            }
            Err(err) => self.toast_failure(err),
        }
    }

    async fn seed(&mut self) {
        match self.client.seed_expenses().await {
            Ok(seeded) => {
                self.state.notify(
                    format!("Added {} sample expenses", seeded.len()),
                    ToastLevel::Success,
                );
                self.expenses_changed().await;
            }
            Err(err) => self.toast_failure(err),
        }
    }

    async fn clear(&mut self) {
        match self.client.clear_expenses().await {
            Ok(cleared) => {
                self.state.notify(
                    format!("Removed {} expenses", cleared.deleted),
                    ToastLevel::Info,
                );
                self.state.expenses.selected = 0;
                self.expenses_changed().await;
            }
            Err(err) => self.toast_failure(err),
        }
    }

    /// Local state is written first; the server copy is best effort.
    async fn save_settings(&mut self) {
        let currency = self.state.settings.currency;
        let theme = self.state.settings.theme;
        self.state.apply_preferences(currency, theme);
        self.local.set_preferences(currency.symbol(), theme);
        self.save_local();

        let update = UserSettingsUpdate {
            theme: Some(theme),
            currency: Some(currency.symbol().to_string()),
        };
        match self.client.update_settings(&update).await {
            Ok(_) => {
                self.state.settings.message = None;
                self.state.notify("Settings saved", ToastLevel::Success);
            }
            Err(err) => {
                if let Some(message) = self.client_failure(err) {
                    self.state.settings.message =
                        Some(format!("Saved locally, server update failed: {message}"));
                }
            }
        }
    }

    async fn logout(&mut self) {
        if let Err(err) = self.client.logout().await {
            tracing::debug!("logout call failed: {}", err.message());
        }
        self.client.clear_token();
        self.local.clear_session();
        self.save_local();
        self.state.sign_out(Some("Signed out".to_string()));
    }
}
