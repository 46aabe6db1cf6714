use chrono::{DateTime, NaiveDate, Utc};

/// The two UTC calendar days a report covers: the report date and the day
/// before it. Time of day is never considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    today: NaiveDate,
    yesterday: NaiveDate,
}

impl DateWindow {
    pub fn ending_on(today: NaiveDate) -> Self {
        Self {
            today,
            yesterday: today.pred_opt().unwrap_or(today),
        }
    }

    pub fn ending_today() -> Self {
        Self::ending_on(Utc::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn yesterday(&self) -> NaiveDate {
        self.yesterday
    }

    pub fn contains(&self, created_at: &DateTime<Utc>) -> bool {
        let date = created_at.date_naive();
        date == self.today || date == self.yesterday
    }
}
