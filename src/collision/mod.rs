mod ray;
mod solver;

pub use ray::{Ray, RayHit, hit_test};
pub use solver::{CollisionOutcome, Contacts, collide};
