pub mod admin_user;
pub mod consultation;
pub mod offer;
pub mod project;
pub mod testimonial;

pub use admin_user::AdminUser;
pub use consultation::Consultation;
pub use offer::Offer;
pub use project::Project;
pub use testimonial::Testimonial;
