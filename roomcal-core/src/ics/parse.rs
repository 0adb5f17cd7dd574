//! ICS parsing using the icalendar crate's parser.

use icalendar::parser::{self, read_calendar, unfold};

use crate::calendar::{Calendar, Component, Parameter, Property, RawComponent};
use crate::error::{RoomCalError, RoomCalResult};

/// Parse raw ICS bytes into an owned `Calendar`.
pub fn parse_calendar(raw: &[u8]) -> RoomCalResult<Calendar> {
    let content = std::str::from_utf8(raw)
        .map_err(|e| RoomCalError::IcsParse(format!("calendar is not valid UTF-8: {e}")))?;

    let unfolded = unfold(content);
    if !starts_with_vcalendar(&unfolded) {
        return Err(RoomCalError::IcsParse(
            "document does not start with BEGIN:VCALENDAR".to_string(),
        ));
    }

    let parsed = read_calendar(&unfolded).map_err(|e| RoomCalError::IcsParse(e.to_string()))?;

    Ok(Calendar {
        properties: parsed.properties.iter().map(to_property).collect(),
        components: parsed
            .components
            .iter()
            .map(|c| Component::from_raw(to_raw_component(c)))
            .collect(),
    })
}

fn starts_with_vcalendar(content: &str) -> bool {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.eq_ignore_ascii_case("BEGIN:VCALENDAR"))
}

fn to_raw_component(component: &parser::Component<'_>) -> RawComponent {
    RawComponent {
        name: component.name.to_string(),
        properties: component.properties.iter().map(to_property).collect(),
        components: component.components.iter().map(to_raw_component).collect(),
    }
}

fn to_property(prop: &parser::Property<'_>) -> Property {
    Property {
        name: prop.name.to_string(),
        params: prop
            .params
            .iter()
            .map(|p| Parameter {
                key: p.key.to_string(),
                value: p.val.as_ref().map(|v| v.to_string()),
            })
            .collect(),
        value: prop.val.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_calendar_properties_and_component_order() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Amsterdam\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:a\r\n\
SUMMARY:First\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:b\r\n\
SUMMARY:Second\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let calendar = parse_calendar(ics.as_bytes()).expect("Should parse");

        assert_eq!(calendar.properties.len(), 2);
        assert_eq!(calendar.properties[0], Property::new("VERSION", "2.0"));
        assert_eq!(calendar.components.len(), 3);
        assert!(matches!(calendar.components[0], Component::Other(_)));
        let summaries: Vec<&str> = calendar
            .events()
            .filter_map(|e| e.property_value("SUMMARY"))
            .collect();
        assert_eq!(summaries, vec!["First", "Second"]);
    }

    #[test]
    fn test_parse_keeps_nested_alarm() {
        let ics = "BEGIN:VCALENDAR\n\
VERSION:2.0\n\
PRODID:TEST\n\
BEGIN:VEVENT\n\
UID:a\n\
BEGIN:VALARM\n\
ACTION:DISPLAY\n\
TRIGGER:-PT15M\n\
END:VALARM\n\
END:VEVENT\n\
END:VCALENDAR\n";

        let calendar = parse_calendar(ics.as_bytes()).expect("Should parse");
        let event = calendar.events().next().expect("Should have event");
        assert_eq!(event.components.len(), 1);
        assert_eq!(event.components[0].name, "VALARM");
        assert_eq!(event.components[0].property_value("TRIGGER"), Some("-PT15M"));
    }

    #[test]
    fn test_parse_unfolds_long_lines() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:a\r\n\
LOCATION:Main \r\n Hall\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let calendar = parse_calendar(ics.as_bytes()).expect("Should parse");
        let event = calendar.events().next().unwrap();
        assert_eq!(event.property_value("LOCATION"), Some("Main Hall"));
    }

    #[test]
    fn test_parse_rejects_non_calendar_text() {
        let err = parse_calendar(b"<html><body>Unauthorized</body></html>").unwrap_err();
        assert!(matches!(err, RoomCalError::IcsParse(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let err = parse_calendar(&[0x42, 0x45, 0xff, 0xfe]).unwrap_err();
        assert!(err.to_string().contains("UTF-8"), "got {}", err);
    }

    #[test]
    fn test_parse_rejects_empty_body() {
        assert!(parse_calendar(b"").is_err());
    }
}
