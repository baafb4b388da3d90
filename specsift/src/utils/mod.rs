pub mod correlation;
pub mod sort;
