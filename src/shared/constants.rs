/// Default page size for public listing browse
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Default page size for a seller's own listings
pub const DEFAULT_OWNER_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Exclusive upper bound on a listing price (`NUMERIC(14, 2)`)
pub const MAX_LISTING_PRICE: i64 = 1_000_000_000_000;

/// Decimal places stored for a listing price
pub const LISTING_PRICE_SCALE: u32 = 2;

/// Maximum number of images attached to one listing
pub const MAX_LISTING_IMAGES: usize = 10;

/// Maximum length of a category token accepted from clients
pub const MAX_CATEGORY_TOKEN_LEN: usize = 100;
