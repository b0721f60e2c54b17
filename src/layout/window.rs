use chrono::{Datelike, Months, NaiveDate};

use crate::error::{HeatmapError, Result};
use crate::ir::Year;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rolling: bool,
}

impl Window {
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }
}

/// Picks the days a year's sub-grid covers.
///
/// Calendar mode always shows Jan 1 through Dec 31. In full-year mode the
/// current year becomes the rolling year ending at `reference`, unless the
/// summary already describes some other span, which is then taken as is.
pub(super) fn resolve_window(year: &Year, full_year: bool, reference: NaiveDate) -> Result<Window> {
    if !full_year {
        let start = NaiveDate::from_ymd_opt(year.year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year.year, 12, 31);
        let (Some(start), Some(end)) = (start, end) else {
            return Err(HeatmapError::data(
                format!("year {}", year.year),
                "year out of supported range",
            ));
        };
        return Ok(Window {
            start,
            end,
            rolling: false,
        });
    }

    if year.is_calendar_year() && year.year == reference.year() {
        let start = reference
            .checked_sub_months(Months::new(12))
            .and_then(|day| day.succ_opt())
            .ok_or_else(|| {
                HeatmapError::config(format!("reference date {reference} out of range"))
            })?;
        return Ok(Window {
            start,
            end: reference,
            rolling: true,
        });
    }

    Ok(Window {
        start: year.start,
        end: year.end,
        rolling: false,
    })
}
