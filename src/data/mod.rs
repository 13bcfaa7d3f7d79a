pub mod buildings;
pub mod catalog;
pub mod disputes;
pub mod onboarding;
pub mod stories;

pub use buildings::{Building, MapPosition};
pub use catalog::{load_content_catalog, ContentCatalog, ContentDataError};
pub use disputes::{Dispute, DisputeChoice, DisputeLevel};
pub use onboarding::OnboardingPage;
pub use stories::Story;
