use chrono::{Datelike, Months, NaiveDate};

use super::MonthLabel;
use super::grid::grid_position;
use super::text::month_abbrev;

/// Minimum distance, in columns, between two month labels.
pub const MIN_MONTH_LABEL_GAP: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    column: usize,
    month: u32,
}

/// Places month labels for the window `[start, end]`.
///
/// Every first-of-month inside the window gets a label at its column. The
/// month the window opens in is labelled at column 0 only when the next
/// boundary leaves room for it. Labels closer than [`MIN_MONTH_LABEL_GAP`]
/// to the previous kept label are dropped.
pub(super) fn place_month_labels(start: NaiveDate, end: NaiveDate, pitch: f32) -> Vec<MonthLabel> {
    let mut boundaries = Vec::new();
    let mut first_of_month = start.with_day(1).and_then(|day| day.checked_add_months(Months::new(1)));
    while let Some(day) = first_of_month {
        if day > end {
            break;
        }
        boundaries.push(Candidate {
            column: grid_position(start, day).0,
            month: day.month(),
        });
        first_of_month = day.checked_add_months(Months::new(1));
    }

    let opening = Candidate {
        column: 0,
        month: start.month(),
    };
    let opening_fits = start.day() == 1
        || boundaries
            .first()
            .is_none_or(|next| next.column >= MIN_MONTH_LABEL_GAP);

    let mut labels: Vec<MonthLabel> = Vec::new();
    let candidates = opening_fits
        .then_some(opening)
        .into_iter()
        .chain(boundaries);
    for candidate in candidates {
        if let Some(previous) = labels.last()
            && candidate.column < previous.column + MIN_MONTH_LABEL_GAP
        {
            continue;
        }
        labels.push(MonthLabel {
            column: candidate.column,
            text: month_abbrev(candidate.month).to_string(),
            x: candidate.column as f32 * pitch,
        });
    }
    labels
}
