use crate::Error;
use std::{fmt, str::FromStr};

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Century,
    Decade,
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
}

impl Unit {
    /// Outermost first.
    pub const ALL: [Unit; 11] = [
        Unit::Century,
        Unit::Decade,
        Unit::Year,
        Unit::Month,
        Unit::Week,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
        Unit::Millisecond,
        Unit::Microsecond,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Century => "century",
            Unit::Decade => "decade",
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::Millisecond => "millisecond",
            Unit::Microsecond => "microsecond",
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Unit::Millisecond | Unit::Microsecond => 3,
            _ => 2,
        }
    }

    /// Size of the unit in milliseconds. Month and longer are fixed approximations.
    fn milliseconds(&self) -> f64 {
        match self {
            Unit::Century => MILLISECONDS_PER_DAY * 36525.0,
            Unit::Decade => MILLISECONDS_PER_DAY * 3652.5,
            Unit::Year => MILLISECONDS_PER_DAY * 365.25,
            Unit::Month => MILLISECONDS_PER_DAY * 30.44,
            Unit::Week => 604_800_000.0,
            Unit::Day => MILLISECONDS_PER_DAY,
            Unit::Hour => 3_600_000.0,
            Unit::Minute => 60_000.0,
            Unit::Second => 1000.0,
            Unit::Millisecond => 1.0,
            Unit::Microsecond => 0.001,
        }
    }

    /// `None` for the outermost unit, which is unbounded.
    pub fn modulus(&self) -> Option<u64> {
        match self {
            Unit::Century => None,
            Unit::Decade | Unit::Year => Some(10),
            Unit::Month => Some(12),
            Unit::Week => Some(4),
            Unit::Day => Some(7),
            Unit::Hour => Some(24),
            Unit::Minute | Unit::Second => Some(60),
            Unit::Millisecond | Unit::Microsecond => Some(1000),
        }
    }

    fn count(&self, milliseconds: f64) -> u64 {
        // Microseconds scale up instead of dividing by 0.001, which is inexact.
        let count = match self {
            Unit::Microsecond => (milliseconds * 1000.0).floor(),
            Unit::Millisecond => milliseconds.floor(),
            unit => (milliseconds / unit.milliseconds()).floor(),
        } as u64;
        match self.modulus() {
            Some(modulus) => count % modulus,
            None => count,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .iter()
            .find(|unit| unit.name() == name)
            .copied()
            .ok_or_else(|| Error::new(format!(r#"Unknown unit "{}""#, name)))
    }
}

/// Eleven-field decomposition of an elapsed duration into nested time-unit buckets.
///
/// This is a cosmetic breakdown: months are always 30.44 days and years 365.25 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitBreakdown {
    pub century: u64,
    pub decade: u64,
    pub year: u64,
    pub month: u64,
    pub week: u64,
    pub day: u64,
    pub hour: u64,
    pub minute: u64,
    pub second: u64,
    pub millisecond: u64,
    pub microsecond: u64,
}

impl UnitBreakdown {
    /// Negative and NaN inputs decompose as zero.
    ///
    /// Unit counts saturate at `u64::MAX`. The microsecond count saturates first, so inputs
    /// above about 1.8e16 ms (roughly 5,800 centuries) no longer decompose exactly.
    pub fn from_millis(milliseconds: f64) -> Self {
        let milliseconds = if milliseconds > 0.0 { milliseconds } else { 0.0 };
        Self {
            century: Unit::Century.count(milliseconds),
            decade: Unit::Decade.count(milliseconds),
            year: Unit::Year.count(milliseconds),
            month: Unit::Month.count(milliseconds),
            week: Unit::Week.count(milliseconds),
            day: Unit::Day.count(milliseconds),
            hour: Unit::Hour.count(milliseconds),
            minute: Unit::Minute.count(milliseconds),
            second: Unit::Second.count(milliseconds),
            millisecond: Unit::Millisecond.count(milliseconds),
            microsecond: Unit::Microsecond.count(milliseconds),
        }
    }

    pub fn value(&self, unit: Unit) -> u64 {
        match unit {
            Unit::Century => self.century,
            Unit::Decade => self.decade,
            Unit::Year => self.year,
            Unit::Month => self.month,
            Unit::Week => self.week,
            Unit::Day => self.day,
            Unit::Hour => self.hour,
            Unit::Minute => self.minute,
            Unit::Second => self.second,
            Unit::Millisecond => self.millisecond,
            Unit::Microsecond => self.microsecond,
        }
    }

    pub fn render(&self, unit: Unit) -> String {
        format!("{:0width$}", self.value(unit), width = unit.width())
    }

    pub fn slots(&self) -> Vec<(Unit, String)> {
        Unit::ALL.iter().map(|&unit| (unit, self.render(unit))).collect()
    }
}

impl fmt::Display for UnitBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}:{} {}:{}:{}.{}.{}",
            self.render(Unit::Century),
            self.render(Unit::Decade),
            self.render(Unit::Year),
            self.render(Unit::Month),
            self.render(Unit::Week),
            self.render(Unit::Day),
            self.render(Unit::Hour),
            self.render(Unit::Minute),
            self.render(Unit::Second),
            self.render(Unit::Millisecond),
            self.render(Unit::Microsecond),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Unit, UnitBreakdown};

    fn render(milliseconds: f64, unit: Unit) -> String {
        UnitBreakdown::from_millis(milliseconds).render(unit)
    }

    #[test]
    fn zero() {
        let breakdown = UnitBreakdown::from_millis(0.0);
        assert_eq!(breakdown, UnitBreakdown::default());
        for (unit, value) in breakdown.slots() {
            assert_eq!(value, "0".repeat(unit.width()));
        }
        assert_eq!(breakdown.to_string(), "00:00:00:00:00:00 00:00:00.000.000");
    }

    #[test]
    fn millisecond_boundary() {
        assert_eq!(render(999.0, Unit::Millisecond), "999");
        assert_eq!(render(999.0, Unit::Second), "00");
        assert_eq!(render(1000.0, Unit::Second), "01");
        assert_eq!(render(1000.0, Unit::Millisecond), "000");
    }

    #[test]
    fn minute_boundary() {
        assert_eq!(render(60_000.0, Unit::Minute), "01");
        assert_eq!(render(60_000.0, Unit::Second), "00");
        assert_eq!(render(59_999.0, Unit::Minute), "00");
        assert_eq!(render(59_999.0, Unit::Second), "59");
    }

    #[test]
    fn fractional_milliseconds() {
        let breakdown = UnitBreakdown::from_millis(1.25);
        assert_eq!(breakdown.millisecond, 1);
        assert_eq!(breakdown.microsecond, 250);
        assert_eq!(breakdown.render(Unit::Microsecond), "250");
    }

    #[test]
    fn scenario() {
        let breakdown = UnitBreakdown::from_millis(1500.0);
        assert_eq!(breakdown.render(Unit::Second), "01");
        assert_eq!(breakdown.render(Unit::Millisecond), "500");
    }

    #[test]
    fn week_wraps_every_four() {
        let breakdown = UnitBreakdown::from_millis(4.0 * 604_800_000.0 + 86_400_000.0);
        assert_eq!(breakdown.week, 0);
        assert_eq!(breakdown.day, 1);
        // 29 days is still short of one 30.44-day month
        assert_eq!(breakdown.month, 0);
    }

    #[test]
    fn hour_boundary() {
        let breakdown = UnitBreakdown::from_millis(3_600_000.0);
        assert_eq!((breakdown.hour, breakdown.minute, breakdown.second), (1, 0, 0));
        let breakdown = UnitBreakdown::from_millis(3_600_000.0 - 1.0);
        assert_eq!((breakdown.hour, breakdown.minute, breakdown.second), (0, 59, 59));
    }

    #[test]
    fn day_boundary() {
        let breakdown = UnitBreakdown::from_millis(86_400_000.0);
        assert_eq!((breakdown.day, breakdown.hour), (1, 0));
        let breakdown = UnitBreakdown::from_millis(86_400_000.0 - 1.0);
        assert_eq!((breakdown.day, breakdown.hour, breakdown.minute), (0, 23, 59));
    }

    #[test]
    fn week_boundary() {
        let breakdown = UnitBreakdown::from_millis(604_800_000.0);
        assert_eq!((breakdown.week, breakdown.day), (1, 0));
        let breakdown = UnitBreakdown::from_millis(604_800_000.0 - 1.0);
        assert_eq!((breakdown.week, breakdown.day), (0, 6));
    }

    #[test]
    fn month_boundary() {
        let month = 86_400_000.0 * 30.44;
        assert_eq!(UnitBreakdown::from_millis(month).month, 1);
        assert_eq!(UnitBreakdown::from_millis(month - 1.0).month, 0);
        assert_eq!(UnitBreakdown::from_millis(month).render(Unit::Month), "01");
    }

    #[test]
    fn year_boundary() {
        let year = 86_400_000.0 * 365.25;
        let breakdown = UnitBreakdown::from_millis(year);
        assert_eq!((breakdown.year, breakdown.month), (1, 11));
        let breakdown = UnitBreakdown::from_millis(year - 1.0);
        assert_eq!((breakdown.year, breakdown.month), (0, 11));
    }

    #[test]
    fn decade_boundary() {
        let decade = 86_400_000.0 * 3652.5;
        let breakdown = UnitBreakdown::from_millis(decade);
        assert_eq!((breakdown.decade, breakdown.year), (1, 0));
        let breakdown = UnitBreakdown::from_millis(decade - 1.0);
        assert_eq!((breakdown.decade, breakdown.year), (0, 9));
    }

    #[test]
    fn one_century() {
        let breakdown = UnitBreakdown::from_millis(86_400_000.0 * 36525.0);
        assert_eq!(breakdown.century, 1);
        assert_eq!(breakdown.decade, 0);
        assert_eq!(breakdown.year, 0);
        assert_eq!(breakdown.month, 11);
        assert_eq!(breakdown.week, 1);
        assert_eq!(breakdown.day, 6);
        assert_eq!(breakdown.hour, 0);
        assert_eq!(breakdown.render(Unit::Century), "01");
    }

    #[test]
    fn century_is_unbounded() {
        let breakdown = UnitBreakdown::from_millis(86_400_000.0 * 36525.0 * 123.0);
        assert_eq!(breakdown.century, 123);
        assert_eq!(breakdown.render(Unit::Century), "123");
    }

    #[test]
    fn huge_inputs_saturate() {
        let breakdown = UnitBreakdown::from_millis(1e300);
        assert_eq!(breakdown.century, u64::MAX);
        assert_eq!(breakdown.microsecond, u64::MAX % 1000);
    }

    #[test]
    fn deterministic() {
        for milliseconds in [0.0, 0.5, 999.0, 1500.0, 3_723_004.0, 1e13] {
            assert_eq!(UnitBreakdown::from_millis(milliseconds), UnitBreakdown::from_millis(milliseconds));
        }
    }

    #[test]
    fn negative_and_nan_are_zero() {
        assert_eq!(UnitBreakdown::from_millis(-5.0), UnitBreakdown::default());
        assert_eq!(UnitBreakdown::from_millis(f64::NAN), UnitBreakdown::default());
    }

    #[test]
    fn parse_unit() {
        for unit in Unit::ALL {
            assert_eq!(unit.name().parse::<Unit>(), Ok(unit));
        }
        let error = "fortnight".parse::<Unit>().unwrap_err();
        assert_eq!(error.message(), r#"Unknown unit "fortnight""#);
    }
}
