pub mod companies;
pub mod signals;

pub use companies::{COMPANIES, CompanyProfile, find_company};
pub use signals::{Signal, SignalCatalog, SignalCategory, SignalKey};
