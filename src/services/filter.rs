use crate::models::criteria::FilterCriteria;
use crate::models::listing::Listing;

/// Result of one filter pass. Both sequences keep the input order: the
/// caller derives map bounds and list rows from it directly.
#[derive(Debug, Default, Clone)]
pub struct FilterOutcome {
    pub visible: Vec<Listing>,
    pub unlocated: Vec<Listing>,
}

/// Splits the listings in a single pass.
///
/// A listing without both finite coordinates goes to `unlocated` no matter
/// what the other criteria say: location-less entries are always surfaced so
/// they are not silently lost. A located listing failing any predicate is
/// dropped from both outputs.
pub fn split_listings(listings: &[Listing], criteria: &FilterCriteria) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for listing in listings {
        if !listing.is_located() {
            outcome.unlocated.push(listing.clone());
            continue;
        }
        if passes_criteria(listing, criteria) {
            outcome.visible.push(listing.clone());
        }
    }

    outcome
}

fn passes_criteria(listing: &Listing, criteria: &FilterCriteria) -> bool {
    if let Some(max_rent) = criteria.max_rent {
        // Absent rent passes; only a known rent above the bound fails.
        if let Some(rent) = listing.rent {
            if rent > max_rent {
                return false;
            }
        }
    }

    if !text_matches(criteria.property_type_filter(), listing.property_type.as_deref()) {
        return false;
    }

    if !text_matches(criteria.parking_filter(), listing.parking.as_deref()) {
        return false;
    }

    true
}

/// Exact case-insensitive match. An absent listing value fails a non-empty
/// filter.
fn text_matches(filter: Option<&str>, value: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(wanted) => match value {
            Some(actual) => actual.trim().to_lowercase() == wanted.to_lowercase(),
            None => false,
        },
    }
}
