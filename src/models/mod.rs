pub mod booking;
pub mod report;
pub mod user;
pub mod visit;

pub use booking::{CompletedBooking, DraftBooking};
pub use report::{ActivityReport, Recommendation};
pub use user::User;
pub use visit::Visit;
