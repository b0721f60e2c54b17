use crate::config::GradingPolicy;
use crate::ir::{ColorSource, Contribution};
use crate::theme::{GRADE_COUNT, Theme};

const MAX_GRADE: usize = GRADE_COUNT - 1;

/// Maps a raw count to a grade index in `0..=4`.
///
/// `max_count` is the highest count inside the window being laid out, for
/// scales that grade relative to the busiest day. Results above 4 are
/// clamped by the caller.
pub trait GradeScale {
    fn grade(&self, count: u64, max_count: u64) -> usize;
}

impl GradeScale for GradingPolicy {
    fn grade(&self, count: u64, max_count: u64) -> usize {
        if count == 0 {
            return 0;
        }
        match self {
            GradingPolicy::Relative => {
                let max = max_count.max(count) as u128;
                let scaled = (MAX_GRADE as u128 * count as u128).div_ceil(max);
                (scaled as usize).clamp(1, MAX_GRADE)
            }
            GradingPolicy::Thresholds { thresholds } => {
                thresholds.iter().filter(|limit| count >= **limit).count()
            }
        }
    }
}

impl<F> GradeScale for F
where
    F: Fn(u64, u64) -> usize,
{
    fn grade(&self, count: u64, max_count: u64) -> usize {
        self(count, max_count)
    }
}

/// Final color of a day plus the grade it was drawn from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ResolvedColor {
    pub color: String,
    pub grade: Option<usize>,
}

/// Explicit color beats explicit intensity, which beats the count scale.
pub(super) fn resolve_color(
    day: Option<&Contribution>,
    max_count: u64,
    theme: &Theme,
    scale: &dyn GradeScale,
) -> ResolvedColor {
    let grade = match day {
        None => 0,
        Some(day) => match &day.source {
            ColorSource::Explicit(color) => {
                return ResolvedColor {
                    color: color.clone(),
                    grade: None,
                };
            }
            ColorSource::Intensity(intensity) => (*intensity).clamp(0, MAX_GRADE as i64) as usize,
            ColorSource::Count => scale.grade(day.count, max_count).min(MAX_GRADE),
        },
    };
    ResolvedColor {
        color: theme.grade(grade).to_string(),
        grade: Some(grade),
    }
}
