/// Reactive date and year state
///
/// Updates are pure: they store the new value and return an `Effect` saying whether
/// the mounted view must refetch. The widget executes the effect.
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::formatting::{current_year, format_date, shift_date};

/// How a view should refetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshRequest {
    pub force: bool,
    pub date_changed: bool,
}

/// Side effect of a state update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Refresh(RefreshRequest),
}

const DATE_CHANGED: Effect = Effect::Refresh(RefreshRequest {
    force: false,
    date_changed: true,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateState {
    current_date: String,
    current_year: String,
    today: String,
}

impl DateState {
    /// Explicit date if given, else today in `tz`; the current calendar year in `tz`
    pub fn initialize(explicit_date: Option<&str>, tz: Tz, now: DateTime<Utc>) -> Self {
        let today = format_date(now, tz);
        Self {
            current_date: explicit_date
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| today.clone()),
            current_year: current_year(now, tz),
            today,
        }
    }

    pub fn current_date(&self) -> &str {
        &self.current_date
    }

    pub fn current_year(&self) -> &str {
        &self.current_year
    }

    pub fn today(&self) -> &str {
        &self.today
    }

    /// An empty date means today
    pub fn set_current_date(&mut self, date: &str) -> Effect {
        let date = if date.is_empty() { self.today.as_str() } else { date };
        if self.current_date == date {
            return Effect::None;
        }
        self.current_date = date.to_string();
        DATE_CHANGED
    }

    pub fn set_current_year(&mut self, year: &str) -> Effect {
        if self.current_year == year {
            return Effect::None;
        }
        self.current_year = year.to_string();
        DATE_CHANGED
    }

    /// Move the current date by `days`; unparseable dates are left alone
    pub fn shift_date(&mut self, days: i64) -> Effect {
        match shift_date(&self.current_date, days) {
            Some(date) => self.set_current_date(&date),
            None => Effect::None,
        }
    }

    pub fn go_to_today(&mut self) -> Effect {
        let today = self.today.clone();
        self.set_current_date(&today)
    }
}
