pub mod lane;
pub mod session;
pub mod week;

pub use lane::{LaneTable, WeekLane};
pub use session::{RawSession, SessionRecord};
pub use week::WeekKey;
