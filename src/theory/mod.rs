pub mod keys;
pub mod nashville;
pub mod pitch;
