pub mod colors;
pub mod logging;
pub mod spinner;
