//! Picking Module
//!
//! Pointer picking for grid boards:
//! - [`ray`]: pick camera, screen-to-world rays, box, prism and plane tests
//! - [`scene`]: what rays are cast against, with structure back-references
//! - [`events`]: typed picker events and subscriptions
//! - [`caster`]: the [`Picker`] state machine
//!
//! The picker never touches the grid or game state. It reports what the
//! pointer is over and what was clicked; callers decide what that means.

pub mod caster;
pub mod events;
pub mod ray;
pub mod scene;

pub use caster::Picker;
pub use events::{PickerError, PickerEvent, PickerEventKind, SubscriptionId};
pub use ray::{PickCamera, Ray, ray_aabb_intersect, ray_prism_intersect};
pub use scene::{Intersection, PickGroup, PickObject, PickScene, PickShape, StructureRef};
