pub mod geocoder_client;
pub mod listings_client;
