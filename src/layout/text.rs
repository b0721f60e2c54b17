use chrono::{Datelike, NaiveDate};

use crate::error::{HeatmapError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    /// Full year zero-padded to the given width, date-fns `y`/`yyy`/`yyyy`.
    Year(usize),
    YearShort,
    MonthNumber,
    MonthPadded,
    MonthShort,
    MonthLong,
    Day,
    DayPadded,
    DayOrdinal,
    WeekdayShort,
    WeekdayLong,
}

/// A compiled date-fns style pattern such as `MMM d, yyyy`.
///
/// Supports the tokens that make sense for a day-granular calendar. Quoted
/// text is literal (`''` is a single quote); any other unquoted ASCII letter
/// is rejected so typos surface instead of leaking into labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    tokens: Vec<Token>,
}

impl DatePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut idx = 0;
        while idx < chars.len() {
            let ch = chars[idx];
            if ch == '\'' {
                if chars.get(idx + 1) == Some(&'\'') {
                    literal.push('\'');
                    idx += 2;
                    continue;
                }
                let Some(close) = chars[idx + 1..].iter().position(|c| *c == '\'') else {
                    return Err(HeatmapError::config(format!(
                        "dateFormat `{pattern}` has an unterminated quote"
                    )));
                };
                literal.extend(&chars[idx + 1..idx + 1 + close]);
                idx += close + 2;
                continue;
            }
            if !ch.is_ascii_alphabetic() {
                literal.push(ch);
                idx += 1;
                continue;
            }

            let run = chars[idx..].iter().take_while(|c| **c == ch).count();
            let ordinal = ch == 'd' && run == 1 && chars.get(idx + 1) == Some(&'o');
            let token = match (ch, run) {
                ('d', 1) if ordinal => Token::DayOrdinal,
                ('y', 2) => Token::YearShort,
                ('y', _) => Token::Year(run),
                ('M', 1) => Token::MonthNumber,
                ('M', 2) => Token::MonthPadded,
                ('M', 3) => Token::MonthShort,
                ('M', 4) => Token::MonthLong,
                ('d', 1) => Token::Day,
                ('d', 2) => Token::DayPadded,
                ('E', 1..=3) => Token::WeekdayShort,
                ('E', 4) => Token::WeekdayLong,
                _ => {
                    return Err(HeatmapError::config(format!(
                        "dateFormat `{pattern}`: unsupported token `{}`",
                        ch.to_string().repeat(run)
                    )));
                }
            };
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(token);
            idx += if ordinal { 2 } else { run };
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        Ok(Self { tokens })
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Year(width) => out.push_str(&format!("{:0width$}", date.year(), width = *width)),
                Token::YearShort => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
                Token::MonthNumber => out.push_str(&date.month().to_string()),
                Token::MonthPadded => out.push_str(&format!("{:02}", date.month())),
                Token::MonthShort => out.push_str(&date.format("%b").to_string()),
                Token::MonthLong => out.push_str(&date.format("%B").to_string()),
                Token::Day => out.push_str(&date.day().to_string()),
                Token::DayPadded => out.push_str(&format!("{:02}", date.day())),
                Token::DayOrdinal => out.push_str(&ordinal(date.day())),
                Token::WeekdayShort => out.push_str(&date.format("%a").to_string()),
                Token::WeekdayLong => out.push_str(&date.format("%A").to_string()),
            }
        }
        out
    }
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

fn contributions(count: u64) -> String {
    match count {
        0 => "No contributions".to_string(),
        1 => "1 contribution".to_string(),
        n => format!("{n} contributions"),
    }
}

pub(super) fn cell_label(count: u64, date: NaiveDate, pattern: &DatePattern) -> String {
    format!("{} on {}", contributions(count), pattern.format(date))
}

pub(super) fn title_text(total: u64, year: i32, rolling: bool) -> String {
    let noun = if total == 1 { "contribution" } else { "contributions" };
    if rolling {
        format!("{total} {noun} in the last year")
    } else {
        format!("{total} {noun} in {year}")
    }
}

pub(super) fn month_abbrev(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

/// Approximate advance of `ch` in ems for a typical sans-serif face.
pub(super) fn char_width_factor(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.28,
        ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' => 0.86,
        '0'..='9' => 0.56,
        'A'..='Z' => 0.67,
        'a'..='z' => 0.52,
        c if c.is_ascii() => 0.5,
        _ => 1.0,
    }
}

/// Deterministic width estimate; the layout never consults installed fonts.
pub(super) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}
