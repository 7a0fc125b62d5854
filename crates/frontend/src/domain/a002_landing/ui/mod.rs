pub mod page;

pub use page::{LandingPreview, PREVIEW_ROOT_ID};
