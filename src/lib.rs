//! Client-side state machine for the CopyFlow marketing recommendation
//! service: startup gate, connectivity probe, product form, submission and
//! result tabs.

pub mod api;
pub mod app;
pub mod cli;
pub mod connectivity;
pub mod form;
pub mod result;
pub mod startup;
pub mod submission;
pub mod trace;
pub mod view;
