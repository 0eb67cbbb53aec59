//! Client-side view state. Everything here is plain data plus the small
//! derivations the views need, so it can be tested without a terminal.

use std::time::{Duration, Instant};

use api_types::{
    auth::UserView,
    expense::{ExpenseNew, ExpenseView},
    report::{CategoryReport, MonthlyReport, ReportSummary},
    settings::{Theme, UserSettings},
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use engine::{Category, Currency, Money};

use crate::local_state::LocalState;

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Expenses,
    Reports,
    Settings,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Expenses, Section::Reports, Section::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Self::Expenses => "Expenses",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Expenses => Self::Reports,
            Self::Reports => Self::Settings,
            Self::Settings => Self::Expenses,
        }
    }

    /// Maps the `1`..`3` shortcuts.
    pub fn from_digit(ch: char) -> Option<Self> {
        let idx = ch.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(idx).copied()
    }
}

#[derive(Debug, Default)]
pub struct SignInState {
    pub input: String,
    pub pending: bool,
    pub message: Option<String>,
}

impl SignInState {
    /// Returns the token to exchange, at most once per submit.
    ///
    /// Empty input and submits while an exchange is in flight yield `None`.
    pub fn take_submission(&mut self) -> Option<String> {
        if self.pending {
            return None;
        }
        let token = self.input.trim();
        if token.is_empty() {
            self.message = Some("Paste a Google ID token first".to_string());
            return None;
        }
        self.pending = true;
        self.message = None;
        Some(token.to_string())
    }

    pub fn finish(&mut self, message: Option<String>) {
        self.pending = false;
        if message.is_none() {
            self.input.clear();
        }
        self.message = message;
    }

    pub fn paste(&mut self, text: &str) {
        self.input
            .extend(text.chars().filter(|ch| !ch.is_whitespace()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseStats {
    pub total: Money,
    pub count: u64,
    /// `total / count` rounded to whole units, zero when empty.
    pub average: Money,
}

#[derive(Debug, Default)]
pub struct ExpensesState {
    pub items: Vec<ExpenseView>,
    pub selected: usize,
    pub error: Option<String>,
}

impl ExpensesState {
    pub fn set_items(&mut self, items: Vec<ExpenseView>) {
        self.items = items;
        self.error = None;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_expense(&self) -> Option<&ExpenseView> {
        self.items.get(self.selected)
    }

    pub fn stats(&self) -> ExpenseStats {
        let total: Money = self.items.iter().map(amount_of).sum();
        let count = self.items.len() as u64;
        ExpenseStats {
            total,
            count,
            average: total.average(count).round_to_unit(),
        }
    }
}

pub fn amount_of(expense: &ExpenseView) -> Money {
    Money::from_major(expense.amount).unwrap_or_default()
}

/// Calendar date shown for an expense: its own date, or the creation day in
/// the configured timezone for records that have none.
pub fn expense_date(expense: &ExpenseView, tz: Tz) -> NaiveDate {
    expense
        .date
        .unwrap_or_else(|| expense.created_at.with_timezone(&tz).date_naive())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Amount,
    Category,
    Date,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Title,
        FormField::Amount,
        FormField::Category,
        FormField::Date,
    ];

    fn step(self, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ORDER[next]
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category: Category,
    /// `YYYY-MM-DD`; empty lets the server pick today.
    pub date: String,
    pub focus: FormField,
    /// Id of the expense being edited, `None` when adding.
    pub editing: Option<i64>,
    pub error: Option<String>,
}

impl ExpenseForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: Category::Food,
            date: today.format("%Y-%m-%d").to_string(),
            focus: FormField::Title,
            editing: None,
            error: None,
        }
    }

    pub fn from_expense(expense: &ExpenseView, tz: Tz) -> Self {
        Self {
            title: expense.title.clone(),
            amount: amount_of(expense).to_string(),
            category: Category::lookup(&expense.category),
            date: expense_date(expense, tz).format("%Y-%m-%d").to_string(),
            focus: FormField::Title,
            editing: Some(expense.id),
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.step(true);
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.step(false);
    }

    pub fn cycle_category(&mut self, forward: bool) {
        if self.focus == FormField::Category {
            self.category = if forward {
                self.category.next()
            } else {
                self.category.prev()
            };
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Amount => Some(&mut self.amount),
            FormField::Date => Some(&mut self.date),
            FormField::Category => None,
        }
    }

    pub fn push(&mut self, ch: char) {
        if let Some(field) = self.focused_text() {
            field.push(ch);
        }
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.focused_text() {
            field.extend(text.chars().filter(|ch| *ch != '\n' && *ch != '\r'));
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_text() {
            field.pop();
        }
    }

    /// Validates the form into a request body.
    pub fn to_payload(&self) -> Result<ExpenseNew, String> {
        let title = self.title.trim();
        if title.is_empty() || self.amount.trim().is_empty() {
            return Err("Please fill in title and amount".to_string());
        }
        let amount: Money = self
            .amount
            .parse()
            .map_err(|err: engine::EngineError| err.to_string())?;
        if amount.is_negative() {
            return Err("Amount cannot be negative".to_string());
        }
        let date = match self.date.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| "Date must be YYYY-MM-DD".to_string())?,
            ),
        };

        Ok(ExpenseNew {
            title: title.to_string(),
            amount: amount.to_major(),
            category: self.category.as_str().to_string(),
            date,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Overlay {
    None,
    Form(ExpenseForm),
    Details,
    ConfirmClear,
    ConfirmDelete(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Currency,
    Theme,
}

#[derive(Debug)]
pub struct SettingsState {
    pub currency: Currency,
    pub theme: Theme,
    pub focus: SettingsField,
    pub message: Option<String>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            theme: Theme::default(),
            focus: SettingsField::Currency,
            message: None,
        }
    }
}

impl SettingsState {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SettingsField::Currency => SettingsField::Theme,
            SettingsField::Theme => SettingsField::Currency,
        };
    }

    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            SettingsField::Currency => {
                let all = Currency::ALL;
                let idx = all.iter().position(|c| *c == self.currency).unwrap_or(0);
                let next = if forward {
                    (idx + 1) % all.len()
                } else {
                    (idx + all.len() - 1) % all.len()
                };
                self.currency = all[next];
            }
            SettingsField::Theme => self.theme = self.theme.toggled(),
        }
    }
}

/// Display preferences in effect: locally stored values take precedence
/// over the server's, defaults fill whatever neither side has.
pub fn resolve_preferences(local: &LocalState, remote: Option<&UserSettings>) -> (Currency, Theme) {
    let currency = local
        .currency
        .as_deref()
        .and_then(Currency::from_symbol)
        .or_else(|| remote.and_then(|r| Currency::from_symbol(&r.currency)))
        .unwrap_or_default();
    let theme = local
        .theme
        .or_else(|| remote.map(|r| r.theme))
        .unwrap_or_default();
    (currency, theme)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTab {
    Overview,
    Categories,
    Monthly,
}

impl ReportTab {
    pub const ALL: [ReportTab; 3] = [ReportTab::Overview, ReportTab::Categories, ReportTab::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Categories => "Categories",
            Self::Monthly => "Monthly",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Categories,
            Self::Categories => Self::Monthly,
            Self::Monthly => Self::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Monthly,
            Self::Categories => Self::Overview,
            Self::Monthly => Self::Categories,
        }
    }
}

#[derive(Debug)]
pub struct ReportsState {
    pub tab: ReportTab,
    pub summary: Option<ReportSummary>,
    pub categories: Vec<CategoryReport>,
    pub monthly: Vec<MonthlyReport>,
    pub error: Option<String>,
    pub loaded: bool,
}

impl Default for ReportsState {
    fn default() -> Self {
        Self {
            tab: ReportTab::Overview,
            summary: None,
            categories: Vec::new(),
            monthly: Vec::new(),
            error: None,
            loaded: false,
        }
    }
}

impl ReportsState {
    pub fn set(
        &mut self,
        summary: ReportSummary,
        categories: Vec<CategoryReport>,
        monthly: Vec<MonthlyReport>,
    ) {
        self.summary = Some(summary);
        self.categories = categories;
        self.monthly = monthly;
        self.error = None;
        self.loaded = true;
    }

    /// Marks data stale after the expense set changed.
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

impl ToastState {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub sign_in: SignInState,
    pub user: Option<UserView>,
    pub expenses: ExpensesState,
    pub overlay: Overlay,
    pub settings: SettingsState,
    pub reports: ReportsState,
    pub toast: Option<ToastState>,
    /// Preferences currently applied to rendering.
    pub currency: Currency,
    pub theme: Theme,
    pub base_url: String,
    pub tz: Tz,
}

impl AppState {
    pub fn new(base_url: &str, tz: Tz) -> Self {
        Self {
            screen: Screen::SignIn,
            section: Section::Expenses,
            sign_in: SignInState::default(),
            user: None,
            expenses: ExpensesState::default(),
            overlay: Overlay::None,
            settings: SettingsState::default(),
            reports: ReportsState::default(),
            toast: None,
            currency: Currency::default(),
            theme: Theme::default(),
            base_url: base_url.to_string(),
            tz,
        }
    }

    pub fn apply_preferences(&mut self, currency: Currency, theme: Theme) {
        self.currency = currency;
        self.theme = theme;
        self.settings.currency = currency;
        self.settings.theme = theme;
    }

    /// Drops everything tied to the signed-in user.
    pub fn sign_out(&mut self, message: Option<String>) {
        self.screen = Screen::SignIn;
        self.section = Section::Expenses;
        self.user = None;
        self.expenses = ExpensesState::default();
        self.reports = ReportsState::default();
        self.overlay = Overlay::None;
        self.sign_in = SignInState {
            message,
            ..SignInState::default()
        };
    }

    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.tz).date_naive()
    }

    pub fn notify(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toast = Some(ToastState::new(message, level));
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn expense(id: i64, amount: f64, date: Option<&str>) -> ExpenseView {
        ExpenseView {
            id,
            title: format!("item {id}"),
            amount,
            category: "Food".to_string(),
            date: date.map(|d| d.parse().unwrap()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap(),
        }
    }

    #[test]
    fn sign_in_submits_once_and_ignores_empty() {
        let mut state = SignInState::default();
        assert_eq!(state.take_submission(), None);
        assert!(state.message.is_some());

        state.paste(" abc.def\n");
        assert_eq!(state.take_submission().as_deref(), Some("abc.def"));
        assert_eq!(state.take_submission(), None);

        state.finish(Some("Invalid Google token".to_string()));
        assert!(!state.pending);
        assert_eq!(state.input, "abc.def");
        assert_eq!(state.take_submission().as_deref(), Some("abc.def"));

        state.finish(None);
        assert!(state.input.is_empty());
    }

    #[test]
    fn stats_round_average_to_whole_units() {
        let mut state = ExpensesState::default();
        assert_eq!(
            state.stats(),
            ExpenseStats {
                total: Money::ZERO,
                count: 0,
                average: Money::ZERO
            }
        );

        state.set_items(vec![expense(1, 10.0, None), expense(2, 15.5, None)]);
        let stats = state.stats();
        assert_eq!(stats.total.minor(), 2550);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average.minor(), 1300);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = ExpensesState::default();
        state.select_next();
        assert_eq!(state.selected, 0);

        state.set_items(vec![expense(1, 1.0, None), expense(2, 2.0, None)]);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_expense().unwrap().id, 2);

        state.set_items(vec![expense(1, 1.0, None)]);
        assert_eq!(state.selected, 0);
        state.select_prev();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn date_falls_back_to_creation_day_in_timezone() {
        let tz: Tz = "Asia/Kolkata".parse().unwrap();
        let dated = expense(1, 1.0, Some("2024-02-10"));
        assert_eq!(expense_date(&dated, tz).to_string(), "2024-02-10");

        let undated = expense(2, 1.0, None);
        assert_eq!(expense_date(&undated, chrono_tz::UTC).to_string(), "2024-03-01");
        assert_eq!(expense_date(&undated, tz).to_string(), "2024-03-02");
        assert_eq!(format_date(expense_date(&undated, tz)), "Mar 02, 2024");
    }

    #[test]
    fn form_validates_before_submit() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut form = ExpenseForm::new(today);
        assert_eq!(form.date, "2024-05-01");
        assert!(form.to_payload().is_err());

        for ch in "Tea".chars() {
            form.push(ch);
        }
        form.next_field();
        form.paste("2,5");
        form.next_field();
        form.push('x');
        form.cycle_category(true);
        assert_eq!(form.category, Category::Entertainment);

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.title, "Tea");
        assert_eq!(payload.amount, 2.5);
        assert_eq!(payload.category, "Entertainment");
        assert_eq!(payload.date, Some(today));

        form.amount = "-1".to_string();
        assert!(form.to_payload().is_err());
        form.amount = "1.234".to_string();
        assert!(form.to_payload().is_err());
        form.amount = "1".to_string();
        form.date = "01/05/2024".to_string();
        assert_eq!(form.to_payload().unwrap_err(), "Date must be YYYY-MM-DD");
        form.date.clear();
        assert_eq!(form.to_payload().unwrap().date, None);
    }

    #[test]
    fn edit_form_prefills_and_maps_unknown_category() {
        let mut view = expense(7, 12.5, None);
        view.category = "Crypto".to_string();
        let form = ExpenseForm::from_expense(&view, chrono_tz::UTC);
        assert_eq!(form.editing, Some(7));
        assert_eq!(form.amount, "12.50");
        assert_eq!(form.category, Category::Other);
        assert_eq!(form.date, "2024-03-01");
    }

    #[test]
    fn local_preferences_win() {
        let remote = UserSettings {
            theme: Theme::Light,
            currency: "$".to_string(),
        };

        let empty = LocalState::default();
        assert_eq!(resolve_preferences(&empty, None), (Currency::Inr, Theme::Dark));
        assert_eq!(
            resolve_preferences(&empty, Some(&remote)),
            (Currency::Usd, Theme::Light)
        );

        let mut local = LocalState::default();
        local.set_preferences("€", Theme::Dark);
        assert_eq!(
            resolve_preferences(&local, Some(&remote)),
            (Currency::Eur, Theme::Dark)
        );
    }

    #[test]
    fn settings_picker_cycles() {
        let mut settings = SettingsState::default();
        settings.cycle(false);
        assert_eq!(settings.currency, Currency::Gbp);
        settings.cycle(true);
        assert_eq!(settings.currency, Currency::Inr);
        settings.toggle_focus();
        settings.cycle(true);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn sections_and_tabs_cycle() {
        assert_eq!(Section::from_digit('2'), Some(Section::Reports));
        assert_eq!(Section::from_digit('0'), None);
        assert_eq!(Section::from_digit('4'), None);
        assert_eq!(Section::Settings.next(), Section::Expenses);
        assert_eq!(ReportTab::Overview.prev(), ReportTab::Monthly);
    }

    #[test]
    fn sign_out_resets_user_data() {
        let mut state = AppState::new("http://localhost", chrono_tz::UTC);
        state.screen = Screen::Main;
        state.expenses.set_items(vec![expense(1, 1.0, None)]);
        state.sign_out(Some("Session expired".to_string()));
        assert_eq!(state.screen, Screen::SignIn);
        assert!(state.expenses.items.is_empty());
        assert_eq!(state.sign_in.message.as_deref(), Some("Session expired"));
    }
}
