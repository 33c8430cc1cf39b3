pub mod generate;
pub mod page;
pub mod upload;
