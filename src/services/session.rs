use crate::clients::geocoder_client::GeocoderClient;
use crate::clients::listings_client;
use crate::models::criteria::FilterCriteria;
use crate::models::listing::{property_type_from_bedrooms, Listing};
use crate::render::RenderSink;
use crate::services::filter::{split_listings, FilterOutcome};
use crate::store::ListingStore;

/// Owns the session's store and current criteria, and runs the
/// store -> filter -> sink flow on load, on every criteria change, and on
/// every mutation.
#[derive(Debug, Default)]
pub struct Session {
    store: ListingStore,
    criteria: FilterCriteria,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Bulk load from the remote data source, replacing the store.
    pub async fn load_from_source(&mut self, data_url: &str) -> FilterOutcome {
        let listings = listings_client::fetch_listings(data_url).await;
        self.load_listings(listings)
    }

    pub fn load_listings(&mut self, listings: Vec<Listing>) -> FilterOutcome {
        self.store.load_all(listings);
        self.refresh()
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> FilterOutcome {
        self.criteria = criteria;
        self.refresh()
    }

    pub fn refresh(&self) -> FilterOutcome {
        split_listings(self.store.all(), &self.criteria)
    }

    /// Add-form flow: fills in the property type from the bedroom count when
    /// missing, then makes one geocoding attempt if the record is unlocated
    /// and has an address or label to ask with; no call at all otherwise. A
    /// miss appends the listing as unlocated.
    pub async fn add_listing(
        &mut self,
        mut listing: Listing,
        geocoder: &GeocoderClient,
        city_hint: &str,
    ) -> FilterOutcome {
        if listing.property_type.is_none() {
            if let Some(bedrooms) = listing.bedrooms {
                listing.property_type = Some(property_type_from_bedrooms(bedrooms));
            }
        }
        if !listing.is_located() {
            if let Some(query) = listing.geocode_query(city_hint) {
                if let Some(coordinates) = geocoder.geocode(&query).await {
                    listing.latitude = Some(coordinates.lat);
                    listing.longitude = Some(coordinates.lon);
                }
            }
        }
        self.store.append(listing);
        self.refresh()
    }

    pub fn render(&self, outcome: &FilterOutcome, sink: &mut dyn RenderSink) {
        sink.render_markers(&outcome.visible);
        sink.render_unlocated(&outcome.unlocated);
    }
}
