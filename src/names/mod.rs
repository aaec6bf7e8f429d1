pub mod cleaner;
pub mod projection;
