pub mod booking_date;
pub mod dataset;
pub mod error;
pub mod factory;
pub mod ids;
pub mod retriever;
pub mod scan;
pub mod source;

pub use booking_date::{find_booking_date, parse_booking_label};
pub use dataset::{get_matching_time, parse, JoinedDatasets, LocationInfo, TimeInfo, TimeMap};
pub use error::ScraperError;
pub use factory::{create_location, NO_APPOINTMENTS};
pub use ids::extract_location_ids;
pub use retriever::{locations_from_blocks, LocationRetriever};
pub use scan::{find_dataset, LOCATION_DATA_PATTERN, TIME_DATA_PATTERN};
pub use source::{extract_script_blocks, HttpPageSource, PageSource};
