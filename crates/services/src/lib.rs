pub mod context_store;
pub mod output;
pub mod reference_scan;
