// Core algorithm exports
pub mod criteria;
pub mod distance;
pub mod evaluator;
pub mod filters;

pub use criteria::{SearchCriteria, SearchMode};
pub use distance::{calculate_bounding_box, distance_km, is_within_bounding_box};
pub use evaluator::{evaluate, SearchOutcome};
pub use filters::{
    matches_age_groups, matches_availability_flags, matches_location, matches_meal_options,
    matches_schedule_options, matches_type,
};
