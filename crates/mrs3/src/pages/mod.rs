//! Page controllers for the three application routes.

mod compress;
mod landing;
mod restore;

pub use compress::CompressPage;
pub use landing::LandingPage;
pub use restore::RestorePage;
