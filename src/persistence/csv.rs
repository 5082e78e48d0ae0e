use std::collections::HashMap;

use crate::models::listing::{coerce_float, coerce_int, Listing};

/// Fixed column order shared with the published data files.
pub const CSV_HEADER: [&str; 11] = [
    "loyer",
    "adresse",
    "cuisine_equipee",
    "type",
    "parking",
    "chambres",
    "surface_m2",
    "url",
    "label",
    "latitude",
    "longitude",
];

/// Serializes the full collection, header first. Fields containing a comma,
/// quote, or newline are quoted with internal quotes doubled.
pub fn to_csv(listings: &[Listing]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');

    for listing in listings {
        let row: Vec<String> = field_values(listing)
            .iter()
            .map(|field| escape_field(field))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Parses CSV text back into listings. Tolerates a UTF-8 BOM, matches header
/// names case-insensitively, and ignores columns with no or unknown names.
/// Rows with every field blank are skipped.
pub fn parse_csv(text: &str) -> Vec<Listing> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = parse_records(text).into_iter();

    let header = match records.next() {
        Some(header) => header,
        None => return Vec::new(),
    };

    let mut columns: HashMap<String, usize> = HashMap::new();
    for (position, name) in header.iter().enumerate() {
        let key = name.trim().to_lowercase();
        if !key.is_empty() {
            columns.entry(key).or_insert(position);
        }
    }

    let mut listings = Vec::new();
    for record in records {
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let text = |column: &str| -> Option<String> {
            let index = *columns.get(column)?;
            let value = record.get(index)?.trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };

        listings.push(Listing {
            rent: text("loyer").and_then(|v| coerce_int(&v)),
            address: text("adresse"),
            kitchen_equipped: text("cuisine_equipee"),
            property_type: text("type"),
            parking: text("parking"),
            bedrooms: text("chambres").and_then(|v| coerce_int(&v)),
            surface_m2: text("surface_m2").and_then(|v| coerce_float(&v)),
            url: text("url"),
            label: text("label"),
            latitude: text("latitude").and_then(|v| coerce_float(&v)),
            longitude: text("longitude").and_then(|v| coerce_float(&v)),
        });
    }

    listings
}

fn field_values(listing: &Listing) -> [String; 11] {
    [
        listing.rent.map(|v| v.to_string()).unwrap_or_default(),
        listing.address.clone().unwrap_or_default(),
        listing.kitchen_equipped.clone().unwrap_or_default(),
        listing.property_type.clone().unwrap_or_default(),
        listing.parking.clone().unwrap_or_default(),
        listing.bedrooms.map(|v| v.to_string()).unwrap_or_default(),
        listing.surface_m2.map(|v| v.to_string()).unwrap_or_default(),
        listing.url.clone().unwrap_or_default(),
        listing.label.clone().unwrap_or_default(),
        listing.latitude.map(|v| v.to_string()).unwrap_or_default(),
        listing.longitude.map(|v| v.to_string()).unwrap_or_default(),
    ]
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits raw CSV text into records of fields: quoted fields may hold
/// commas, newlines, and doubled quotes; records end on LF or CRLF.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}
