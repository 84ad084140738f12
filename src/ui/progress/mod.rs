// Wed Jan 15 2026 - Alex

pub mod spinner;

pub use spinner::ProgressSpinner;
