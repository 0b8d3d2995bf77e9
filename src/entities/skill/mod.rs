//! Skill entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
#[cfg(feature = "postgres")]
pub mod store;

pub use descriptor::SkillDescriptor;
pub use model::{Skill, SkillCategory, SkillLevel, SkillPayload};
