mod profile;
mod seller;

pub use profile::{ProfileFields, UserProfile};
pub use seller::SellerSummary;
