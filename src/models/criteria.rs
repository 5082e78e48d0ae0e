use serde::Deserialize;

/// Filter inputs, all optional and AND-combined. Built by the caller from
/// whatever control surface it has; the engine never touches presentation
/// state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterCriteria {
    pub max_rent: Option<i64>,
    pub property_type: Option<String>,
    pub parking: Option<String>,
}

impl FilterCriteria {
    pub fn none() -> FilterCriteria {
        FilterCriteria::default()
    }

    /// Blank or whitespace-only text filters count as unset.
    pub fn property_type_filter(&self) -> Option<&str> {
        non_blank(self.property_type.as_deref())
    }

    pub fn parking_filter(&self) -> Option<&str> {
        non_blank(self.parking.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed),
        _ => None,
    }
}
