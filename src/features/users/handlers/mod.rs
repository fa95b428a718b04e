mod my_ads_handler;
mod profile_handler;

pub use my_ads_handler::*;
pub use profile_handler::*;
