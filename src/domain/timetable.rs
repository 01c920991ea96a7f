use super::fields::required;
use super::note::NoteColor;
use crate::errors::ValidationError;
use crate::persistence::Record;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Hourly rows of the weekly grid: 8:00 AM through 6:00 PM
pub const SLOT_HOURS: RangeInclusive<u8> = 8..=18;

/// Teaching day shown as a timetable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassDay {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl ClassDay {
    pub fn name(&self) -> &'static str {
        match self {
            ClassDay::Monday => "Monday",
            ClassDay::Tuesday => "Tuesday",
            ClassDay::Wednesday => "Wednesday",
            ClassDay::Thursday => "Thursday",
            ClassDay::Friday => "Friday",
            ClassDay::Saturday => "Saturday",
        }
    }

    /// Three-letter column header
    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }

    pub fn all() -> &'static [ClassDay] {
        &[
            ClassDay::Monday,
            ClassDay::Tuesday,
            ClassDay::Wednesday,
            ClassDay::Thursday,
            ClassDay::Friday,
            ClassDay::Saturday,
        ]
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::Unparsable {
                field: "day",
                value: value.trim().to_string(),
            })
    }
}

/// "9:00 AM" style label for an hour of the day
pub fn slot_label(hour: u8) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", display, suffix)
}

/// Every slot label, in grid order
pub fn slot_labels() -> Vec<String> {
    SLOT_HOURS.map(slot_label).collect()
}

/// Parse a slot label back into its hour
pub fn parse_slot(value: &str) -> Result<u8, ValidationError> {
    SLOT_HOURS
        .into_iter()
        .find(|hour| slot_label(*hour).eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| ValidationError::Unparsable {
            field: "time",
            value: value.trim().to_string(),
        })
}

/// A weekly class on the timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEvent {
    pub id: Uuid,
    pub title: String,
    pub day: ClassDay,
    pub start_hour: u8,
    pub end_hour: u8,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub color: NoteColor,
}

impl ClassEvent {
    /// Build a class. The title is required and the class must end after it starts,
    /// inside the grid's hours.
    pub fn new(
        title: &str,
        day: ClassDay,
        start_hour: u8,
        end_hour: u8,
        location: &str,
        color: NoteColor,
    ) -> Result<Self, ValidationError> {
        let title = required("Class title", title)?;
        if !SLOT_HOURS.contains(&start_hour)
            || !SLOT_HOURS.contains(&end_hour)
            || end_hour <= start_hour
        {
            return Err(ValidationError::InvalidTimeRange);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            day,
            start_hour,
            end_hour,
            location: location.trim().to_string(),
            color,
        })
    }

    /// Number of hourly slots the class spans
    pub fn duration_hours(&self) -> u8 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    /// True when the class runs on `day` during the slot starting at `hour`
    pub fn occupies(&self, day: ClassDay, hour: u8) -> bool {
        self.day == day && hour >= self.start_hour && hour < self.end_hour
    }

    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            slot_label(self.start_hour),
            slot_label(self.end_hour)
        )
    }
}

impl Record for ClassEvent {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Classes running on `day` during the slot starting at `hour`
pub fn classes_in_slot(classes: &[ClassEvent], day: ClassDay, hour: u8) -> Vec<&ClassEvent> {
    classes.iter().filter(|c| c.occupies(day, hour)).collect()
}

/// Classes sorted through the week: by day, then start time
pub fn weekly_order(classes: &[ClassEvent]) -> Vec<&ClassEvent> {
    let mut ordered: Vec<&ClassEvent> = classes.iter().collect();
    ordered.sort_by_key(|c| (c.day, c.start_hour));
    ordered
}

/// Example week shown until the user saves their own classes
pub fn sample_classes() -> Vec<ClassEvent> {
    let class = |title: &str, day, start_hour, end_hour, location: &str, color| ClassEvent {
        id: Uuid::new_v4(),
        title: title.to_string(),
        day,
        start_hour,
        end_hour,
        location: location.to_string(),
        color,
    };
    vec![
        class("Computer Science", ClassDay::Monday, 9, 10, "Room 101", NoteColor::Blue),
        class("Data Structures", ClassDay::Wednesday, 13, 15, "Lab 3", NoteColor::Green),
        class("Algorithms", ClassDay::Friday, 11, 12, "Room 202", NoteColor::Purple),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slot_labels() {
        assert_eq!(slot_label(8), "8:00 AM");
        assert_eq!(slot_label(12), "12:00 PM");
        assert_eq!(slot_label(18), "6:00 PM");
        assert_eq!(slot_labels().len(), 11);
        assert_eq!(parse_slot("1:00 pm"), Ok(13));
        assert!(parse_slot("7:00 AM").is_err());
    }

    #[test]
    fn test_class_requires_title_and_forward_range() {
        assert_eq!(
            ClassEvent::new(" ", ClassDay::Monday, 9, 10, "", NoteColor::Blue),
            Err(ValidationError::EmptyField("Class title"))
        );
        assert_eq!(
            ClassEvent::new("Physics", ClassDay::Monday, 10, 10, "", NoteColor::Blue),
            Err(ValidationError::InvalidTimeRange)
        );
        assert_eq!(
            ClassEvent::new("Physics", ClassDay::Monday, 17, 19, "", NoteColor::Blue),
            Err(ValidationError::InvalidTimeRange)
        );

        let class =
            ClassEvent::new(" Physics ", ClassDay::Tuesday, 14, 16, " Hall B ", NoteColor::Red)
                .unwrap();
        assert_eq!(class.title, "Physics");
        assert_eq!(class.location, "Hall B");
        assert_eq!(class.duration_hours(), 2);
        assert_eq!(class.time_range(), "2:00 PM - 4:00 PM");
    }

    #[test]
    fn test_slot_lookup_spans_start_to_end() {
        let classes = sample_classes();
        let at = |day, hour| {
            classes_in_slot(&classes, day, hour)
                .iter()
                .map(|c| c.title.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(at(ClassDay::Wednesday, 13), vec!["Data Structures"]);
        assert_eq!(at(ClassDay::Wednesday, 14), vec!["Data Structures"]);
        assert!(at(ClassDay::Wednesday, 15).is_empty());
        assert!(at(ClassDay::Thursday, 13).is_empty());
    }

    #[test]
    fn test_weekly_order() {
        let mut classes = sample_classes();
        classes.reverse();
        let titles: Vec<&str> = weekly_order(&classes)
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["Computer Science", "Data Structures", "Algorithms"]
        );
    }

    #[test]
    fn test_day_parse() {
        assert_eq!(ClassDay::parse("friday"), Ok(ClassDay::Friday));
        assert_eq!(ClassDay::Saturday.short_name(), "Sat");
        assert!(ClassDay::parse("Sunday").is_err());
    }
}
