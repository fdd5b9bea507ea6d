//! Service scheduling form

use std::{fmt, str::FromStr};

use jiff::{ToSpan, civil::Date};
use serde::Deserialize;

use crate::checkout::{customer::require_fields, errors::FormError};

const FIRST_HOUR: u8 = 8;
const LAST_HOUR: u8 = 17;

/// A bookable half-hour slot between 08:00 and 17:00 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    /// The slot starting at `hour:minute` (24h), if it lies on the grid.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        let on_grid = (FIRST_HOUR..=LAST_HOUR).contains(&hour)
            && (minute == 0 || minute == 30)
            && !(hour == LAST_HOUR && minute == 30);

        on_grid.then_some(Self { hour, minute })
    }

    /// Every slot in order, from 08:00 to 17:00.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (FIRST_HOUR..=LAST_HOUR)
            .flat_map(|hour| [0, 30].map(|minute| (hour, minute)))
            .filter_map(|(hour, minute)| TimeSlot::new(hour, minute))
    }

    /// Hour of day, 24h
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Minute of the hour, 0 or 30
    pub fn minute(self) -> u8 {
        self.minute
    }
}

/// Displays as a 12-hour clock label, e.g. `8:30 AM`.
impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = match self.hour % 12 {
            0 => 12,
            hour => hour,
        };

        let meridiem = if self.hour < 12 { "AM" } else { "PM" };

        write!(f, "{hour}:{:02} {meridiem}", self.minute)
    }
}

/// Accepts `HH:MM` on a 24h clock or `H:MM AM`/`H:MM PM`.
impl FromStr for TimeSlot {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormError::InvalidTimeSlot(s.to_string());
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        let (clock, meridiem) = if let Some(clock) = upper.strip_suffix("AM") {
            (clock.trim_end(), Some(false))
        } else if let Some(clock) = upper.strip_suffix("PM") {
            (clock.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;

        if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_err| invalid())?;
        let minute: u8 = minute.parse().map_err(|_err| invalid())?;

        let hour = match meridiem {
            None => hour,
            Some(_) if !(1..=12).contains(&hour) => return Err(invalid()),
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };

        TimeSlot::new(hour, minute).ok_or_else(invalid)
    }
}

/// Dates a service may be booked for, relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    earliest: Date,
    latest: Date,
}

impl BookingWindow {
    /// From tomorrow up to three months after `today`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidDate`] if the window would run past the
    /// largest representable date.
    pub fn after(today: Date) -> Result<Self, FormError> {
        let out_of_range = || FormError::InvalidDate(today.to_string());

        let earliest = today.tomorrow().map_err(|_err| out_of_range())?;
        let latest = today
            .checked_add(3_i32.months())
            .map_err(|_err| out_of_range())?;

        Ok(Self { earliest, latest })
    }

    /// First bookable date
    pub fn earliest(&self) -> Date {
        self.earliest
    }

    /// Last bookable date
    pub fn latest(&self) -> Date {
        self.latest
    }

    /// Whether `date` can be booked.
    pub fn contains(&self, date: Date) -> bool {
        (self.earliest..=self.latest).contains(&date)
    }
}

/// Raw values from the service details form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceDetailsForm {
    /// Preferred date, `YYYY-MM-DD`
    pub date: String,

    /// Preferred time slot
    pub time: String,

    /// Anything the technician should know
    pub special_instructions: String,
}

impl ServiceDetailsForm {
    /// Check the date lies in the booking window after `today` and the time
    /// is on the slot grid.
    ///
    /// # Errors
    ///
    /// - [`FormError::MissingFields`]: date or time is blank.
    /// - [`FormError::InvalidDate`]: the date does not parse.
    /// - [`FormError::DateOutOfRange`]: the date is outside the window.
    /// - [`FormError::InvalidTimeSlot`]: the time is not a slot.
    pub fn validate(&self, today: Date) -> Result<ServiceDetails, FormError> {
        require_fields(&[("date", self.date.as_str()), ("time", self.time.as_str())])?;

        let date: Date = self
            .date
            .trim()
            .parse()
            .map_err(|_err| FormError::InvalidDate(self.date.trim().to_string()))?;

        let window = BookingWindow::after(today)?;

        if !window.contains(date) {
            return Err(FormError::DateOutOfRange {
                date,
                earliest: window.earliest(),
                latest: window.latest(),
            });
        }

        let time: TimeSlot = self.time.parse()?;

        Ok(ServiceDetails {
            date,
            time,
            special_instructions: self.special_instructions.trim().to_string(),
        })
    }
}

/// Validated service schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDetails {
    date: Date,
    time: TimeSlot,
    special_instructions: String,
}

impl ServiceDetails {
    /// Requested date
    pub fn date(&self) -> Date {
        self.date
    }

    /// Requested time slot
    pub fn time(&self) -> TimeSlot {
        self.time
    }

    /// Special instructions; may be empty
    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    const TODAY: Date = date(2026, 10, 19);

    fn form(date: &str, time: &str) -> ServiceDetailsForm {
        ServiceDetailsForm {
            date: date.to_string(),
            time: time.to_string(),
            special_instructions: "  Gate code 1234 ".to_string(),
        }
    }

    #[test]
    fn grid_has_nineteen_slots() {
        let slots: Vec<TimeSlot> = TimeSlot::all().collect();

        assert_eq!(slots.len(), 19);
        assert_eq!(slots.first(), TimeSlot::new(8, 0).as_ref());
        assert_eq!(slots.last(), TimeSlot::new(17, 0).as_ref());
    }

    #[test]
    fn off_grid_slots_are_rejected() {
        assert_eq!(TimeSlot::new(7, 30), None);
        assert_eq!(TimeSlot::new(17, 30), None);
        assert_eq!(TimeSlot::new(9, 15), None);
        assert_eq!(TimeSlot::new(18, 0), None);
    }

    #[test]
    fn every_slot_round_trips_through_its_label() -> TestResult {
        for slot in TimeSlot::all() {
            assert_eq!(slot.to_string().parse::<TimeSlot>()?, slot);
        }

        Ok(())
    }

    #[test]
    fn labels_use_twelve_hour_clock() {
        let labels: Vec<String> = [(8, 0), (12, 0), (12, 30), (17, 0)]
            .into_iter()
            .filter_map(|(hour, minute)| TimeSlot::new(hour, minute))
            .map(|slot| slot.to_string())
            .collect();

        assert_eq!(labels, ["8:00 AM", "12:00 PM", "12:30 PM", "5:00 PM"]);
    }

    #[test]
    fn parses_twenty_four_hour_times() -> TestResult {
        assert_eq!("08:30".parse::<TimeSlot>()?, TimeSlot::new(8, 30).ok_or("slot")?);
        assert_eq!("16:00".parse::<TimeSlot>()?, TimeSlot::new(16, 0).ok_or("slot")?);
        assert_eq!(" 3:30 pm ".parse::<TimeSlot>()?, TimeSlot::new(15, 30).ok_or("slot")?);

        Ok(())
    }

    #[test]
    fn rejects_unparseable_times() {
        for input in [
            "", "noon", "8", "13:00 PM", "0:00 AM", "17:30", "9:45", "9:0", "9:000", "9:+0",
        ] {
            assert!(
                matches!(input.parse::<TimeSlot>(), Err(FormError::InvalidTimeSlot(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn window_is_tomorrow_to_three_months() -> TestResult {
        let window = BookingWindow::after(TODAY)?;

        assert_eq!(window.earliest(), date(2026, 10, 20));
        assert_eq!(window.latest(), date(2027, 1, 19));
        assert!(!window.contains(TODAY));
        assert!(window.contains(date(2026, 10, 20)));
        assert!(window.contains(date(2027, 1, 19)));
        assert!(!window.contains(date(2027, 1, 20)));

        Ok(())
    }

    #[test]
    fn valid_form_produces_details() -> TestResult {
        let details = form("2026-11-02", "9:30 AM").validate(TODAY)?;

        assert_eq!(details.date(), date(2026, 11, 2));
        assert_eq!(details.time(), TimeSlot::new(9, 30).ok_or("slot")?);
        assert_eq!(details.special_instructions(), "Gate code 1234");

        Ok(())
    }

    #[test]
    fn blank_date_and_time_are_missing() {
        let result = form(" ", "").validate(TODAY);

        assert!(
            matches!(result, Err(FormError::MissingFields(ref fields)) if fields.as_slice() == ["date", "time"]),
            "got {result:?}"
        );
    }

    #[test]
    fn today_is_not_bookable() {
        let result = form("2026-10-19", "10:00").validate(TODAY);

        assert!(
            matches!(result, Err(FormError::DateOutOfRange { date, .. }) if date == TODAY),
            "got {result:?}"
        );
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let result = form("19/10/2026", "10:00").validate(TODAY);

        assert_eq!(result, Err(FormError::InvalidDate("19/10/2026".to_string())));
    }

    #[test]
    fn special_instructions_are_optional() -> TestResult {
        let details = ServiceDetailsForm {
            special_instructions: String::new(),
            ..form("2026-10-20", "17:00")
        }
        .validate(TODAY)?;

        assert_eq!(details.special_instructions(), "");

        Ok(())
    }
}
