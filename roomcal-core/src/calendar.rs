//! Owned calendar model and the location filter.
//!
//! Components are kept as raw property lists so that a filtered event is
//! written back exactly as the upstream feed described it. Only `VEVENT`
//! gets its own variant; the location predicate never looks at anything else.

use crate::error::RoomCalResult;
use crate::ics::parse_calendar;

/// A property parameter such as `TZID=Europe/Amsterdam` or `VALUE=DATE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub key: String,
    pub value: Option<String>,
}

/// A content line: name, parameters and value.
///
/// TEXT values (SUMMARY, LOCATION, DESCRIPTION, ...) hold the unescaped text
/// as the parser returns it; the writer escapes them again on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub params: Vec<Parameter>,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            params: Vec::new(),
            value: value.into(),
        }
    }
}

/// A `BEGIN:<name>` / `END:<name>` block with its properties and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComponent {
    pub name: String,
    pub properties: Vec<Property>,
    pub components: Vec<RawComponent>,
}

impl RawComponent {
    /// First property with the given name (names compare case-insensitively).
    pub fn find_prop(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Value of the first property with the given name.
    pub fn property_value(&self, name: &str) -> Option<&str> {
        self.find_prop(name).map(|p| p.value.as_str())
    }
}

/// A top-level calendar component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Event(RawComponent),
    Other(RawComponent),
}

impl Component {
    pub fn from_raw(raw: RawComponent) -> Self {
        if raw.name.eq_ignore_ascii_case("VEVENT") {
            Component::Event(raw)
        } else {
            Component::Other(raw)
        }
    }

    pub fn raw(&self) -> &RawComponent {
        match self {
            Component::Event(raw) | Component::Other(raw) => raw,
        }
    }

    pub fn as_event(&self) -> Option<&RawComponent> {
        match self {
            Component::Event(raw) => Some(raw),
            Component::Other(_) => None,
        }
    }
}

/// A parsed calendar: calendar-level properties plus components in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    pub properties: Vec<Property>,
    pub components: Vec<Component>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `VEVENT` components, in document order.
    pub fn events(&self) -> impl Iterator<Item = &RawComponent> {
        self.components.iter().filter_map(Component::as_event)
    }

    /// Build a new calendar holding the calendar properties of `self` and
    /// only those events whose LOCATION contains `term`.
    ///
    /// A missing LOCATION counts as the empty string, so the empty term keeps
    /// every event and any other term skips events without a location.
    pub fn filter_by_location(&self, term: &str) -> Calendar {
        let components = self
            .events()
            .filter(|event| event.property_value("LOCATION").unwrap_or("").contains(term))
            .cloned()
            .map(Component::Event)
            .collect();

        Calendar {
            properties: self.properties.clone(),
            components,
        }
    }
}

/// Parse raw upstream bytes and keep only events whose location contains `term`.
pub fn filter_by_location(raw: &[u8], term: &str) -> RoomCalResult<Calendar> {
    let calendar = parse_calendar(raw)?;
    let filtered = calendar.filter_by_location(term);
    tracing::debug!(
        term,
        total = calendar.events().count(),
        matched = filtered.components.len(),
        "Filtered calendar by location"
    );
    Ok(filtered)
}
