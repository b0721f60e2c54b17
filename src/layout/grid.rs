use chrono::{Datelike, NaiveDate};

/// Rows per week column.
pub const DAYS_PER_WEEK: usize = 7;

/// Row of `date` in a Sunday-first week.
pub(super) fn weekday_row(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// `(column, row)` of `date` in a grid whose first day is `start`.
///
/// Column 0 holds the week containing `start`; when `start` is not a Sunday
/// its leading rows stay empty.
pub(super) fn grid_position(start: NaiveDate, date: NaiveDate) -> (usize, usize) {
    let offset = (date - start).num_days() as usize + weekday_row(start);
    (offset / DAYS_PER_WEEK, weekday_row(date))
}

pub(super) fn column_count(start: NaiveDate, end: NaiveDate) -> usize {
    grid_position(start, end).0 + 1
}

/// Pixel extent of `count` blocks laid out at `pitch` with `margin` between
/// them. Zero blocks occupy no space.
pub(super) fn span(count: usize, pitch: f32, margin: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * pitch - margin
}
