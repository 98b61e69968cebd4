pub mod defaults;
pub mod document;
pub mod options;
pub mod preferences;
