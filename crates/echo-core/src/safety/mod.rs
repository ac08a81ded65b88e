//! Safety domain module.
//!
//! - `gate`: crisis phrase detection that short-circuits the model call
//! - `resources`: static hotline and grounding catalogs shown alongside it

mod gate;
mod resources;

pub use gate::{CRISIS_PHRASES, CRISIS_RESPONSE, CRISIS_TAGS, SafetyGate, SafetyVerdict};
pub use resources::{CrisisResource, GroundingTechnique, crisis_resources, grounding_techniques};
