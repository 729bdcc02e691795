pub mod roster_board;
pub mod staff_directory;

pub use roster_board::RosterBoard;
pub use staff_directory::StaffDirectory;
