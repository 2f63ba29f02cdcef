pub mod markdown;
pub mod overlay;
pub mod page;
