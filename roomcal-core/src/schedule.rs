//! Title/presenter view of a calendar, rendered as XML.
//!
//! Event summaries follow the "Title - Presenter" convention. The last
//! `" - "` separates the presenter; anything before it is the title, so
//! titles may contain the separator themselves.

use quick_xml::se::Serializer;
use serde::Serialize;

use crate::calendar::Calendar;
use crate::error::{RoomCalError, RoomCalResult};

pub const SUMMARY_SEPARATOR: &str = " - ";

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// One talk as shown on a room display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub title: String,
    pub presenter: String,
}

/// Root of the XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "Schedule")]
pub struct Schedule {
    #[serde(rename = "event")]
    pub events: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Collect entries for every event in `calendar`, skipping summaries
    /// that have no separator.
    pub fn from_calendar(calendar: &Calendar) -> Self {
        let events = calendar
            .events()
            .filter_map(|event| split_summary(event.property_value("SUMMARY").unwrap_or("")))
            .collect();
        Schedule { events }
    }
}

/// Split "Title - Presenter" on the last separator.
pub fn split_summary(summary: &str) -> Option<ScheduleEntry> {
    let (title, presenter) = summary.rsplit_once(SUMMARY_SEPARATOR)?;
    Some(ScheduleEntry {
        title: title.to_string(),
        presenter: presenter.to_string(),
    })
}

/// Render the schedule as an indented XML document with declaration.
pub fn generate_xml(schedule: &Schedule) -> RoomCalResult<String> {
    let mut body = String::new();
    let mut serializer = Serializer::new(&mut body);
    serializer.indent(' ', 2);
    schedule
        .serialize(serializer)
        .map_err(|e| RoomCalError::XmlEncode(e.to_string()))?;

    Ok(format!("{XML_HEADER}{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Component, Property, RawComponent};

    fn calendar_with_summaries(summaries: &[Option<&str>]) -> Calendar {
        let components = summaries
            .iter()
            .map(|summary| {
                let mut properties = vec![Property::new("UID", "x")];
                if let Some(summary) = summary {
                    properties.push(Property::new("SUMMARY", *summary));
                }
                Component::Event(RawComponent {
                    name: "VEVENT".to_string(),
                    properties,
                    components: vec![],
                })
            })
            .collect();
        Calendar {
            properties: vec![],
            components,
        }
    }

    #[test]
    fn test_split_title_and_presenter() {
        assert_eq!(
            split_summary("Intro to Rust - Jane Doe"),
            Some(ScheduleEntry {
                title: "Intro to Rust".to_string(),
                presenter: "Jane Doe".to_string(),
            })
        );
    }

    #[test]
    fn test_split_uses_last_separator() {
        assert_eq!(
            split_summary("A - B - C"),
            Some(ScheduleEntry {
                title: "A - B".to_string(),
                presenter: "C".to_string(),
            })
        );
    }

    #[test]
    fn test_split_without_separator_is_none() {
        assert_eq!(split_summary("Keynote"), None);
        assert_eq!(split_summary("Lunch-break"), None);
        assert_eq!(split_summary(""), None);
    }

    #[test]
    fn test_split_allows_empty_segments() {
        assert_eq!(
            split_summary(" - Jane"),
            Some(ScheduleEntry {
                title: String::new(),
                presenter: "Jane".to_string(),
            })
        );
    }

    #[test]
    fn test_schedule_skips_unsplittable_and_missing_summaries() {
        let calendar = calendar_with_summaries(&[
            Some("Intro to Rust - Jane Doe"),
            Some("Keynote"),
            None,
            Some("A - B - C"),
        ]);

        let schedule = Schedule::from_calendar(&calendar);
        let presenters: Vec<&str> = schedule.events.iter().map(|e| e.presenter.as_str()).collect();
        assert_eq!(presenters, vec!["Jane Doe", "C"]);
    }

    #[test]
    fn test_generate_xml_document() {
        let schedule = Schedule {
            events: vec![
                ScheduleEntry {
                    title: "Intro to Rust".to_string(),
                    presenter: "Jane Doe".to_string(),
                },
                ScheduleEntry {
                    title: "Fish & Chips <live>".to_string(),
                    presenter: "John".to_string(),
                },
            ],
        };

        let xml = generate_xml(&schedule).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Schedule>"));
        assert!(xml.contains("\n  <event>\n    <title>Intro to Rust</title>\n    <presenter>Jane Doe</presenter>\n  </event>"));
        assert!(xml.contains("<title>Fish &amp; Chips &lt;live&gt;</title>"));
        assert!(xml.trim_end().ends_with("</Schedule>"));
        assert_eq!(xml.matches("<event>").count(), 2);
    }

    #[test]
    fn test_generate_xml_with_no_events() {
        let xml = generate_xml(&Schedule::default()).unwrap();
        assert!(xml.contains("<Schedule"));
        assert!(!xml.contains("<event>"));
    }
}
