//! Sales analytics dashboard core.
//!
//! The data layer loads a tabular sales dataset, filters it by categorical
//! dimensions, and derives summary metrics, grouped revenue aggregates, and
//! a correlation matrix; [`session::Session`] tracks a selection and its
//! cached [`data::aggregate::ViewModel`]; [`render`] turns the view into a
//! plain-text dashboard for the CLI front-end.

pub mod cli;
pub mod data;
pub mod render;
pub mod session;
