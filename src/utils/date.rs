//! ISO 8601 date parsing for recency ordering.
//!
//! Accepts the shapes a project date is written in: `YYYY`, `YYYY-MM`,
//! `YYYY-MM-DD`, optionally followed by `THH:MM[:SS[.fff]]` and a `Z` or
//! `±HH:MM` offset. Anything else does not parse.

use anyhow::{Result, bail};

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset east of UTC, in minutes.
    pub offset: i16,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset: 0,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();
        if bytes.len() < 4 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        let mut dt = Self::from_ymd(year, 1, 1);
        let mut rest = &bytes[4..];

        if let Some(tail) = rest.strip_prefix(b"-") {
            dt.month = parse_u8(tail.get(0..2)?)?;
            rest = &tail[2..];
            if let Some(tail) = rest.strip_prefix(b"-") {
                dt.day = parse_u8(tail.get(0..2)?)?;
                rest = &tail[2..];
            }
        }

        if let Some((&sep, tail)) = rest.split_first()
            && (sep == b'T' || sep == b' ')
        {
            rest = dt.parse_time(tail)?;
        }

        if !rest.is_empty() {
            return None;
        }

        dt.validate().ok()?;
        Some(dt)
    }

    /// Parse `HH:MM[:SS[.fff]][Z|±HH:MM]`, returning what is left.
    fn parse_time<'a>(&mut self, bytes: &'a [u8]) -> Option<&'a [u8]> {
        self.hour = parse_u8(bytes.get(0..2)?)?;
        if bytes.get(2) != Some(&b':') {
            return None;
        }
        self.minute = parse_u8(bytes.get(3..5)?)?;
        let mut rest = &bytes[5..];

        if let Some(tail) = rest.strip_prefix(b":") {
            self.second = parse_u8(tail.get(0..2)?)?;
            rest = &tail[2..];
            if let Some(tail) = rest.strip_prefix(b".") {
                let digits = tail.iter().take_while(|b| b.is_ascii_digit()).count();
                if digits == 0 {
                    return None;
                }
                rest = &tail[digits..];
            }
        }

        match rest.first() {
            Some(b'Z') => Some(&rest[1..]),
            Some(&sign @ (b'+' | b'-')) => {
                let hours = parse_u8(rest.get(1..3)?)?;
                if rest.get(3) != Some(&b':') {
                    return None;
                }
                let minutes = parse_u8(rest.get(4..6)?)?;
                let offset = i16::from(hours) * 60 + i16::from(minutes);
                self.offset = if sign == b'-' { -offset } else { offset };
                Some(&rest[6..])
            }
            _ => Some(rest),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }
        if offset.abs() >= 24 * 60 {
            bail!("offset is invalid: {offset}");
        }

        Ok(())
    }

    #[inline]
    fn is_leap_year(year: u16) -> bool {
        year.is_multiple_of(4) && (!year.is_multiple_of(100) || year.is_multiple_of(400))
    }

    #[inline]
    fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Seconds since the Unix epoch (negative before 1970).
    pub fn timestamp(&self) -> i64 {
        let days = days_from_civil(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        );
        let seconds = i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
            - i64::from(self.offset) * 60;
        days * 86_400 + seconds
    }
}

/// Sort key for an optional date string: missing or unparseable is the epoch.
pub fn sort_timestamp(date: Option<&str>) -> i64 {
    date.and_then(DateTimeUtc::parse)
        .map_or(0, |dt| dt.timestamp())
}

/// Days between 1970-01-01 and the given civil date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + d as u16;
    }
    Some(result)
}
