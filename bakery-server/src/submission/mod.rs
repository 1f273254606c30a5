//! Lead submission: payload selection, validation and freezing

mod builder;
mod error;

pub use builder::{
    apply_treat_quantity, build_payload, payload_from_request, validate_quantities,
};
pub use error::ValidationError;
