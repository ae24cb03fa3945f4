pub mod browser;
pub mod editor;
pub mod policy;
