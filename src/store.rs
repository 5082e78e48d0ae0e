use log::info;

use crate::models::listing::Listing;

/// Owned, injectable collection of the session's listings. All mutation and
/// reads happen on one logical thread of control; there is no partially
/// updated state to observe.
///
/// Listings are never updated or deleted individually: the whole collection
/// is replaced on load, or one record is appended at the end.
#[derive(Debug, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    pub fn new() -> ListingStore {
        ListingStore {
            listings: Vec::new(),
        }
    }

    /// Replaces the entire collection.
    pub fn load_all(&mut self, listings: Vec<Listing>) {
        info!("Loading {} listings into the store", listings.len());
        self.listings = listings;
    }

    /// Adds one record at the end, preserving insertion order.
    pub fn append(&mut self, listing: Listing) {
        self.listings.push(listing);
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    /// In-place access for coordinate enrichment. Order is never changed.
    pub fn listings_mut(&mut self) -> &mut [Listing] {
        &mut self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_all_replaces_and_append_preserves_order() {
        let mut store = ListingStore::new();
        store.append(Listing {
            address: Some("old".to_string()),
            ..Default::default()
        });

        store.load_all(vec![
            Listing {
                address: Some("a".to_string()),
                ..Default::default()
            },
            Listing {
                address: Some("b".to_string()),
                ..Default::default()
            },
        ]);
        store.append(Listing {
            address: Some("c".to_string()),
            ..Default::default()
        });

        let addresses: Vec<_> = store
            .all()
            .iter()
            .map(|l| l.address.clone().unwrap())
            .collect();
        assert_eq!(addresses, vec!["a", "b", "c"]);
    }
}
