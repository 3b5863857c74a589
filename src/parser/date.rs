//! Air-date inference from the loosely formatted dates found in release names.

use chrono::{Days, NaiveDate};

/// Year, month and day as read from the string, 0 when absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ymd {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

/// Split the raw capture into digit groups and read them as a date.
///
/// One group of eight digits is `YYYYMMDD`. Otherwise the number of groups
/// picks the layout: one group is a day, two are month and day, three are
/// year, month and day (or month, day, year when the last group has four digits).
pub(crate) fn translate_ymd(raw: &str) -> Ymd {
    let groups: Vec<&str> = raw
        .split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .collect();

    // No date component is wider than four digits
    let num = |g: &str| if g.len() > 4 { 0 } else { g.parse::<i32>().unwrap_or(0) };

    match groups.as_slice() {
        [compact] if compact.len() == 8 => Ymd {
            year: num(&compact[..4]),
            month: num(&compact[4..6]),
            day: num(&compact[6..]),
        },
        [day] => Ymd { year: 0, month: 0, day: num(day) },
        [month, day] => Ymd { year: 0, month: num(month), day: num(day) },
        [month, day, year] if year.len() == 4 && month.len() <= 2 => Ymd {
            year: num(year),
            month: num(month),
            day: num(day),
        },
        [year, month, day] => Ymd {
            year: expand_year(year, num(year)),
            month: num(month),
            day: num(day),
        },
        _ => Ymd { year: 0, month: 0, day: 0 },
    }
}

fn expand_year(raw: &str, year: i32) -> i32 {
    if raw.len() <= 2 {
        if year < 70 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

/// Parse an air date capture. A missing year or month is a failed parse.
///
/// Day and month overflow is carried forward (day 31 of a 30 day month is the
/// first of the next month) instead of being rejected.
pub(crate) fn parse_air_date(raw: &str) -> Option<NaiveDate> {
    let Ymd { year, month, day } = translate_ymd(raw);
    if year == 0 || month == 0 {
        return None;
    }

    let months = year * 12 + (month - 1);
    let first = NaiveDate::from_ymd_opt(months.div_euclid(12), (months.rem_euclid(12) + 1) as u32, 1)?;

    if day >= 1 {
        first.checked_add_days(Days::new((day - 1) as u64))
    } else {
        first.checked_sub_days(Days::new((1 - day) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_translate_layouts() {
        assert_eq!(translate_ymd("23"), Ymd { year: 0, month: 0, day: 23 });
        assert_eq!(translate_ymd("11.23"), Ymd { year: 0, month: 11, day: 23 });
        assert_eq!(translate_ymd("2010.11.23"), Ymd { year: 2010, month: 11, day: 23 });
        assert_eq!(translate_ymd("11-23-2010"), Ymd { year: 2010, month: 11, day: 23 });
        assert_eq!(translate_ymd("20101123"), Ymd { year: 2010, month: 11, day: 23 });
        assert_eq!(translate_ymd("10 11 23"), Ymd { year: 2010, month: 11, day: 23 });
    }

    #[test]
    fn test_parse_air_date() {
        assert_eq!(parse_air_date("2010.11.23"), Some(date(2010, 11, 23)));
        assert_eq!(parse_air_date("2010-11-23"), Some(date(2010, 11, 23)));
        assert_eq!(parse_air_date("11.23.2010"), Some(date(2010, 11, 23)));
    }

    #[test]
    fn test_missing_year_or_month_fails() {
        assert_eq!(parse_air_date("23"), None);
        assert_eq!(parse_air_date("11 23"), None);
        assert_eq!(parse_air_date("2010.00.23"), None);
        assert_eq!(parse_air_date(""), None);
    }

    #[test]
    fn test_lenient_overflow() {
        assert_eq!(parse_air_date("2010.11.31"), Some(date(2010, 12, 1)));
        assert_eq!(parse_air_date("2010.13.01"), Some(date(2011, 1, 1)));
        assert_eq!(parse_air_date("2010.03.00"), Some(date(2010, 2, 28)));
    }
}
