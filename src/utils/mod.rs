pub mod browser;
pub mod url;
