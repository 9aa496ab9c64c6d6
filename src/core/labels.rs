use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
    /// Labels count hours from the window origin instead of clock time.
    HoursOnly,
}

/// Closed set of tic-label strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelGenerator {
    /// Month name at midnight on the 1st.
    Month,
    /// Sunday marker at midnight.
    Week,
    /// Day-of-month number at midnight when divisible by the quantity.
    MonthDay,
    /// Weekday name at midnight.
    Weekday,
    /// Clock hour when divisible by the quantity.
    Hour,
    /// Offset from the window origin when divisible by the quantity.
    HoursFromNow,
    Blank,
}

/// One generator assignment of a scale tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicSpec {
    pub generator: LabelGenerator,
    pub quantity: u32,
    pub short_form: bool,
}

impl TicSpec {
    #[must_use]
    pub const fn new(generator: LabelGenerator, quantity: u32) -> Self {
        Self {
            generator,
            quantity,
            short_form: false,
        }
    }

    #[must_use]
    pub const fn short(generator: LabelGenerator, quantity: u32) -> Self {
        Self {
            generator,
            quantity,
            short_form: true,
        }
    }

    #[must_use]
    pub const fn blank() -> Self {
        Self::new(LabelGenerator::Blank, 1)
    }

    /// Evaluates the generator at one hour tic.
    ///
    /// `local` is the tic's absolute time in viewer-local time and
    /// `offset_hours` its index from the window origin.
    #[must_use]
    pub fn label(
        self,
        local: DateTime<FixedOffset>,
        offset_hours: u32,
        format: TimeFormat,
    ) -> Option<String> {
        let quantity = self.quantity.max(1);
        let at_midnight = local.hour() == 0;
        match self.generator {
            LabelGenerator::Month => (at_midnight && local.day() == 1)
                .then(|| MONTH_NAMES[local.month0() as usize].to_owned()),
            LabelGenerator::Week => (at_midnight && local.weekday() == Weekday::Sun)
                .then(|| (if self.short_form { "S" } else { "Sun" }).to_owned()),
            LabelGenerator::MonthDay => {
                (at_midnight && local.day() % quantity == 0).then(|| local.day().to_string())
            }
            LabelGenerator::Weekday => at_midnight.then(|| {
                let name = weekday_abbrev(local.weekday());
                if self.short_form {
                    name[..1].to_owned()
                } else {
                    name.to_owned()
                }
            }),
            LabelGenerator::Hour => {
                (local.hour() % quantity == 0).then(|| format_clock_hour(local.hour(), format))
            }
            LabelGenerator::HoursFromNow => (offset_hours % quantity == 0).then(|| {
                if self.short_form {
                    format!("{offset_hours}h")
                } else {
                    format!("{offset_hours} hrs")
                }
            }),
            LabelGenerator::Blank => None,
        }
    }
}

#[must_use]
pub fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

#[must_use]
pub fn month_abbrev(month0: u32) -> &'static str {
    MONTH_NAMES[(month0 as usize) % MONTH_NAMES.len()]
}

fn format_clock_hour(hour: u32, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwentyFourHour => format!("{hour:02}:00"),
        TimeFormat::TwelveHour | TimeFormat::HoursOnly => {
            let suffix = if hour < 12 { "am" } else { "pm" };
            format!("{}{suffix}", (hour + 11) % 12 + 1)
        }
    }
}
