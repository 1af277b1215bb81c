pub mod link;
pub mod road_load;

pub use link::DrivetrainLink;
pub use road_load::{ReferenceForces, RoadLoad};
