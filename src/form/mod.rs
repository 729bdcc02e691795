pub mod assign;
pub mod staff;

pub use assign::{validate_assignment, AssignForm};
pub use staff::{validate_staff, StaffForm};
