//! Weekly study goals and the day-by-day hour scheduler.
//!
//! A goal references a subject by name (weak reference), targets a weekly
//! hour total and carries a full seven-day schedule. Uniform goals split
//! the total equally across enabled days and are recomputed whenever the
//! total or the enabled-day set changes; custom goals keep per-day hours
//! exactly as entered, with no normalization against the total.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Day of week, numbered 0=Sunday .. 6=Saturday like the persisted
/// schedule maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Default enabled set for a fresh goal.
    pub const WEEKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }

    /// Weekday of a calendar date, in 0=Sunday numbering.
    pub fn from_date(date: NaiveDate) -> Self {
        Weekday::ALL[date.weekday().num_days_from_sunday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Weekday::Sunday),
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            other => Err(ValidationError::InvalidValue {
                field: "weekday".into(),
                message: format!("'{other}' is not a weekday name"),
            }),
        }
    }
}

/// One day's entry in a goal schedule.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DaySlot {
    pub enabled: bool,
    pub hours: f64,
}

impl DaySlot {
    fn enabled_with(hours: f64) -> Self {
        Self {
            enabled: true,
            hours,
        }
    }
}

/// A full week of [`DaySlot`]s; all seven days are always present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeekSchedule {
    #[serde(default)]
    pub sunday: DaySlot,
    #[serde(default)]
    pub monday: DaySlot,
    #[serde(default)]
    pub tuesday: DaySlot,
    #[serde(default)]
    pub wednesday: DaySlot,
    #[serde(default)]
    pub thursday: DaySlot,
    #[serde(default)]
    pub friday: DaySlot,
    #[serde(default)]
    pub saturday: DaySlot,
}

impl WeekSchedule {
    pub fn slot(&self, day: Weekday) -> &DaySlot {
        match day {
            Weekday::Sunday => &self.sunday,
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
        }
    }

    pub fn slot_mut(&mut self, day: Weekday) -> &mut DaySlot {
        match day {
            Weekday::Sunday => &mut self.sunday,
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySlot)> {
        Weekday::ALL.iter().map(move |&d| (d, self.slot(d)))
    }

    pub fn enabled_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .iter()
            .copied()
            .filter(|&d| self.slot(d).enabled)
            .collect()
    }

    /// Sum of hours over enabled days.
    pub fn scheduled_hours(&self) -> f64 {
        self.iter()
            .filter(|(_, s)| s.enabled)
            .map(|(_, s)| s.hours)
            .sum()
    }
}

/// Divide `total_hours` equally among `enabled_days`.
///
/// Every enabled day gets exactly `total_hours / n`, disabled days get 0.
/// Rejects an empty day set and non-positive totals; callers surface this
/// as form validation before any goal is stored.
pub fn uniform_distribute(
    total_hours: f64,
    enabled_days: &[Weekday],
) -> Result<WeekSchedule, ValidationError> {
    if enabled_days.is_empty() {
        return Err(ValidationError::NoEnabledDay);
    }
    if !total_hours.is_finite() || total_hours <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "total_hours".into(),
            message: format!("{total_hours} is not a positive number"),
        });
    }
    let per_day = total_hours / enabled_days.len() as f64;
    let mut schedule = WeekSchedule::default();
    for &day in enabled_days {
        *schedule.slot_mut(day) = DaySlot::enabled_with(per_day);
    }
    Ok(schedule)
}

/// How a goal's weekly total maps onto days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionType {
    Uniform,
    Custom,
}

/// A weekly study-time goal for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Subject name. Weak reference: nothing prevents the subject from
    /// being deleted out from under the goal.
    pub subject: String,
    pub total_hours: f64,
    pub distribution_type: DistributionType,
    pub schedule: WeekSchedule,
}

impl Goal {
    /// Create a uniform goal over the given enabled days.
    pub fn uniform(
        subject: impl Into<String>,
        total_hours: f64,
        enabled_days: &[Weekday],
    ) -> Result<Self, ValidationError> {
        let schedule = uniform_distribute(total_hours, enabled_days)?;
        Ok(Self {
            subject: subject.into(),
            total_hours,
            distribution_type: DistributionType::Uniform,
            schedule,
        })
    }

    /// Create a custom goal with explicit per-day hours.
    ///
    /// Per-day hours are taken as-is and may disagree with `total_hours`;
    /// that mismatch is accepted, not auto-corrected.
    pub fn custom(
        subject: impl Into<String>,
        total_hours: f64,
        schedule: WeekSchedule,
    ) -> Result<Self, ValidationError> {
        if schedule.enabled_days().is_empty() {
            return Err(ValidationError::NoEnabledDay);
        }
        if !total_hours.is_finite() || total_hours <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "total_hours".into(),
                message: format!("{total_hours} is not a positive number"),
            });
        }
        Ok(Self {
            subject: subject.into(),
            total_hours,
            distribution_type: DistributionType::Custom,
            schedule,
        })
    }

    /// Change the weekly total. Uniform goals are redistributed.
    pub fn set_total_hours(&mut self, total_hours: f64) -> Result<(), ValidationError> {
        if !total_hours.is_finite() || total_hours <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "total_hours".into(),
                message: format!("{total_hours} is not a positive number"),
            });
        }
        if self.distribution_type == DistributionType::Uniform {
            self.schedule = uniform_distribute(total_hours, &self.schedule.enabled_days())?;
        }
        self.total_hours = total_hours;
        Ok(())
    }

    /// Enable or disable a day. Disabling the last enabled day is
    /// rejected; uniform goals are redistributed over the new set.
    pub fn set_day_enabled(&mut self, day: Weekday, enabled: bool) -> Result<(), ValidationError> {
        let slot = self.schedule.slot(day);
        if slot.enabled == enabled {
            return Ok(());
        }
        if !enabled && self.schedule.enabled_days().len() == 1 {
            return Err(ValidationError::NoEnabledDay);
        }
        *self.schedule.slot_mut(day) = if enabled {
            DaySlot::enabled_with(0.0)
        } else {
            DaySlot::default()
        };
        if self.distribution_type == DistributionType::Uniform {
            self.schedule = uniform_distribute(self.total_hours, &self.schedule.enabled_days())?;
        }
        Ok(())
    }

    /// Set one day's hours on a custom goal. Enables the day if needed.
    pub fn set_day_hours(&mut self, day: Weekday, hours: f64) -> Result<(), ValidationError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "hours".into(),
                message: format!("{hours} is not a non-negative number"),
            });
        }
        self.distribution_type = DistributionType::Custom;
        *self.schedule.slot_mut(day) = DaySlot::enabled_with(hours);
        Ok(())
    }

    /// True iff this goal's schedule enables the weekday of `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.schedule.slot(Weekday::from_date(date)).enabled
    }

    /// Planned hours for the weekday of `date` (0 on disabled days).
    pub fn planned_hours_on(&self, date: NaiveDate) -> f64 {
        let slot = self.schedule.slot(Weekday::from_date(date));
        if slot.enabled {
            slot.hours
        } else {
            0.0
        }
    }
}

/// Goals whose schedule enables the weekday of `date`.
pub fn goals_active_on(goals: &[Goal], date: NaiveDate) -> Vec<&Goal> {
    goals.iter().filter(|g| g.is_active_on(date)).collect()
}

/// Sum of weekly totals across a goal list (the quick-stats row).
pub fn total_planned_hours(goals: &[Goal]) -> f64 {
    goals.iter().map(|g| g.total_hours).sum()
}
