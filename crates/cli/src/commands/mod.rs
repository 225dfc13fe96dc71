pub mod gateway;
pub mod process;
pub mod status;
