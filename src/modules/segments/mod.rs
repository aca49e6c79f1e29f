pub mod provider;
pub mod sponsorblock;
