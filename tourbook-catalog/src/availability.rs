use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{CatalogError, CatalogResult};

/// Dates the booking modal accepts: today through one year ahead
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl BookingWindow {
    pub fn starting(today: NaiveDate) -> Self {
        let max = today
            .checked_add_months(Months::new(12))
            .unwrap_or(NaiveDate::MAX);
        Self { min: today, max }
    }

    pub fn from_today() -> Self {
        Self::starting(Utc::now().date_naive())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min && date <= self.max
    }

    pub fn check(&self, date: NaiveDate) -> CatalogResult<NaiveDate> {
        if self.contains(date) {
            Ok(date)
        } else {
            Err(CatalogError::DateOutOfWindow {
                date,
                min: self.min,
                max: self.max,
            })
        }
    }
}
