//! Feature Engineering Engine
//!
//! Turns raw patient form inputs into the fixed 21-field feature record the
//! diabetes classifier was trained on.

mod assembler;
mod categories;
mod features;
mod flag;

pub use assembler::{FeatureAssembler, PatientInputs};
pub use categories::{ActivityLevel, AlcoholConsumption, Gender, SmokingHistory};
pub use features::{
    FeatureKind, FeatureRecord, FeatureSpec, FeatureValue, FEATURE_COUNT, FEATURE_NAMES,
    FEATURE_SCHEMA,
};
