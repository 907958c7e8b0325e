//! Site characteristics and domain constants for court.gov.ua

/// court.gov.ua site characteristics
pub mod site {
    /// Catalog page; the same URL answers the court lookup POST with a redirect
    pub const CATALOG_URL: &str = "http://court.gov.ua/sudy/";

    /// Site-wide court search listing used as the name directory
    pub const SEARCH_COURTS_URL: &str = "http://court.gov.ua/search_court.php";

    /// Legacy single-byte charset every page is served in
    pub const PAGE_ENCODING: &str = "windows-1251";

    /// Schedules are cut to this many characters
    pub const SCHEDULE_WIDTH: usize = 67;

    /// Placeholder some detail pages (mostly Crimean courts) show instead of
    /// the court name
    pub const NAME_PLACEHOLDER: &str = "Судова влада";

    /// Script tables keyed `oblK_<region>` hold districts of type code `K + 4`
    pub const DISTRICT_TABLE_OFFSET: u8 = 4;

    /// City table (`mis1_<region>`) and city district table (`raj1_<city>`)
    pub const CITY_TABLE: &str = "mis1";
    pub const CITY_DISTRICT_TABLE: &str = "raj1";
}

/// Crawling defaults
pub mod crawling {
    /// Default output file
    pub const DEFAULT_OUTPUT_FILE: &str = "courts.csv";

    /// Attempts per network operation, the first one included
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Fixed pause between attempts (milliseconds)
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 5000;

    /// Request timeout (seconds)
    pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const DEFAULT_MAX_REQUESTS_PER_SECOND: u32 = 5;

    pub const DEFAULT_MAX_REDIRECTS: usize = 10;

    pub const DEFAULT_USER_AGENT: &str = "court-catalog/0.3 (+https://court.gov.ua registry export)";
}
