//! Datetime string processing
//!
//! Works on possibly partial datetime strings such as `1988-02` or
//! `1988-02-03T10`. A string is split into components by the format's
//! delimiters; the number of components gives its granularity.

use chrono::{Months, NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::{TemporalError, TemporalResult};
use crate::granularity::Granularity;

/// Token counts, delimiters included, of a datetime stripped to each granularity
const TOKEN_INDEX: [usize; 7] = [1, 3, 5, 7, 9, 11, 13];

/// A datetime string layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatetimeStringProcessor {
    /// Separator between the date and the time
    date_time_separator: char,
    /// chrono layout of a fully specified datetime
    layout: &'static str,
}

impl DatetimeStringProcessor {
    /// XML Schema layout, `yyyy-MM-ddTHH:mm:ss.SSS`
    pub const fn xsd() -> Self {
        Self {
            date_time_separator: 'T',
            layout: "%Y-%m-%dT%H:%M:%S%.3f",
        }
    }

    /// JDBC timestamp layout, `yyyy-MM-dd HH:mm:ss.SSS`
    pub const fn jdbc() -> Self {
        Self {
            date_time_separator: ' ',
            layout: "%Y-%m-%d %H:%M:%S%.3f",
        }
    }

    fn is_delimiter(&self, c: char) -> bool {
        matches!(c, '-' | ':' | '.') || c == self.date_time_separator
    }

    /// Component and delimiter tokens in order
    fn tokens<'s>(&self, datetime: &'s str) -> Vec<&'s str> {
        let mut tokens = Vec::new();
        let mut start = None;
        for (i, c) in datetime.char_indices() {
            if self.is_delimiter(c) {
                if let Some(s) = start.take() {
                    tokens.push(&datetime[s..i]);
                }
                tokens.push(&datetime[i..i + c.len_utf8()]);
            } else if start.is_none() {
                start = Some(i);
            }
        }
        if let Some(s) = start {
            tokens.push(&datetime[s..]);
        }
        tokens
    }

    /// Component tokens only
    fn components<'s>(&self, datetime: &'s str) -> Vec<&'s str> {
        datetime
            .split(|c| self.is_delimiter(c))
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn round_down_padding(&self, granularity: Granularity) -> String {
        let sep = self.date_time_separator;
        match granularity {
            Granularity::Years => format!("-01-01{}00:00:00.000", sep),
            Granularity::Months => format!("-01{}00:00:00.000", sep),
            Granularity::Days => format!("{}00:00:00.000", sep),
            Granularity::Hours => ":00:00.000".to_string(),
            Granularity::Minutes => ":00.000".to_string(),
            Granularity::Seconds => ".000".to_string(),
            Granularity::Milliseconds => String::new(),
        }
    }

    fn round_up_padding(&self, granularity: Granularity) -> String {
        let sep = self.date_time_separator;
        match granularity {
            Granularity::Years => format!("-12-31{}23:59:59.999", sep),
            // Month ends depend on the month; see `pad`
            Granularity::Months | Granularity::Days => format!("{}23:59:59.999", sep),
            Granularity::Hours => ":59:59.999".to_string(),
            Granularity::Minutes => ":59.999".to_string(),
            Granularity::Seconds => ".999".to_string(),
            Granularity::Milliseconds => String::new(),
        }
    }

    /// Drop every component finer than `granularity`
    ///
    /// A string coarser than the granularity is returned unchanged, e.g.
    /// `1988-02-01T12:01:22.000` at months is `1988-02`.
    pub fn strip(&self, datetime: &str, granularity: Granularity) -> TemporalResult<String> {
        let tokens = self.tokens(datetime);
        if tokens.is_empty() {
            return Err(TemporalError::invalid_datetime(datetime));
        }

        let keep = TOKEN_INDEX[granularity.index()];
        if tokens.len() <= keep {
            Ok(datetime.to_string())
        } else {
            Ok(tokens[..keep].concat())
        }
    }

    /// Complete a partial datetime to millisecond precision
    ///
    /// Rounding down fills the earliest instant, rounding up the latest; a
    /// month-level string rounds up to the last day of that month.
    pub fn pad(&self, datetime: &str, round_up: bool) -> TemporalResult<String> {
        let trimmed = datetime.trim();
        let components = self.components(trimmed);
        let granularity = components
            .len()
            .checked_sub(1)
            .and_then(|i| Granularity::ALL.get(i).copied())
            .ok_or_else(|| TemporalError::invalid_datetime(datetime))?;

        let year = parse_component(components[0], datetime)?;

        if !round_up {
            return Ok(format!("{}{}", trimmed, self.round_down_padding(granularity)));
        }

        if granularity == Granularity::Months {
            let month = parse_component(components[1], datetime)?;
            let days = days_in_month(year, month)?;
            Ok(format!(
                "{}-{}{}",
                trimmed,
                days,
                self.round_up_padding(Granularity::Days)
            ))
        } else {
            Ok(format!("{}{}", trimmed, self.round_up_padding(granularity)))
        }
    }

    /// Strip to `granularity`, pad and check the result is a real datetime
    pub fn normalize(
        &self,
        datetime: &str,
        granularity: Granularity,
        round_up: bool,
    ) -> TemporalResult<String> {
        let stripped = self.strip(datetime.trim(), granularity)?;
        let padded = self.pad(&stripped, round_up)?;
        self.parse(&padded)?;
        Ok(padded)
    }

    /// Strip to `granularity` and pad, without validation
    ///
    /// The JDBC datetime `1988-02-03 10:10:11.433` at months is
    /// `1988-02-01 00:00:00.000`.
    pub fn express_at_granularity(
        &self,
        datetime: &str,
        granularity: Granularity,
        round_up: bool,
    ) -> TemporalResult<String> {
        let stripped = self.strip(datetime, granularity)?;
        self.pad(&stripped, round_up)
    }

    /// Finest granularity the string specifies, e.g. months for `1999-02`
    pub fn finest_specified_granularity(&self, datetime: &str) -> TemporalResult<Granularity> {
        let count = self.tokens(datetime).len();
        TOKEN_INDEX
            .iter()
            .position(|&index| index == count)
            .map(|i| Granularity::ALL[i])
            .ok_or_else(|| TemporalError::invalid_datetime(datetime))
    }

    pub fn years(&self, datetime: &str) -> TemporalResult<i64> {
        self.component(datetime, Granularity::Years)
    }

    pub fn months(&self, datetime: &str) -> TemporalResult<i64> {
        self.component(datetime, Granularity::Months)
    }

    pub fn days(&self, datetime: &str) -> TemporalResult<i64> {
        self.component(datetime, Granularity::Days)
    }

    pub fn hours(&self, datetime: &str) -> TemporalResult<i64> {
        self.component(datetime, Granularity::Hours)
    }

    pub fn minutes(&self, datetime: &str) -> TemporalResult<i64> {
        self.component(datetime, Granularity::Minutes)
    }

    pub fn seconds(&self, datetime: &str) -> TemporalResult<i64> {
        self.component(datetime, Granularity::Seconds)
    }

    pub fn milliseconds(&self, datetime: &str) -> TemporalResult<i64> {
        self.component(datetime, Granularity::Milliseconds)
    }

    /// Value of one component
    pub fn component(&self, datetime: &str, granularity: Granularity) -> TemporalResult<i64> {
        let tokens = self.tokens(datetime);
        if tokens.is_empty() {
            return Err(TemporalError::invalid_datetime(datetime));
        }

        let index = TOKEN_INDEX[granularity.index()];
        if tokens.len() < index {
            return Err(TemporalError::IncompleteDatetime {
                granularity,
                value: datetime.to_string(),
            });
        }
        parse_component(tokens[index - 1], datetime)
    }

    /// Datetime string of a granule count from `0001-01-01` at midnight
    ///
    /// Years and months are counted in calendar units.
    pub fn granule_count_to_datetime_string(
        &self,
        count: i64,
        granularity: Granularity,
    ) -> TemporalResult<String> {
        let out_of_range = || TemporalError::OutOfRange { count, granularity };
        let epoch = NaiveDate::from_ymd_opt(1, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(out_of_range)?;

        let instant = match granularity {
            Granularity::Years | Granularity::Months => {
                let per_granule = if granularity == Granularity::Years { 12 } else { 1 };
                u32::try_from(count)
                    .ok()
                    .and_then(|c| c.checked_mul(per_granule))
                    .and_then(|months| epoch.checked_add_months(Months::new(months)))
            }
            _ => delta(count, granularity).and_then(|d| epoch.checked_add_signed(d)),
        }
        .ok_or_else(out_of_range)?;

        Ok(instant.format(self.layout).to_string())
    }

    fn parse(&self, datetime: &str) -> TemporalResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(datetime, self.layout)
            .map_err(|_| TemporalError::invalid_datetime(datetime))
    }
}

fn delta(count: i64, granularity: Granularity) -> Option<TimeDelta> {
    match granularity {
        Granularity::Days => TimeDelta::try_days(count),
        Granularity::Hours => TimeDelta::try_hours(count),
        Granularity::Minutes => TimeDelta::try_minutes(count),
        Granularity::Seconds => TimeDelta::try_seconds(count),
        Granularity::Milliseconds => TimeDelta::try_milliseconds(count),
        Granularity::Years | Granularity::Months => None,
    }
}

fn parse_component(token: &str, datetime: &str) -> TemporalResult<i64> {
    token
        .trim()
        .parse()
        .map_err(|_| TemporalError::invalid_datetime(datetime))
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> TemporalResult<i64> {
    match month {
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        4 | 6 | 9 | 11 => Ok(30),
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        _ => Err(TemporalError::InvalidMonth { month }),
    }
}
