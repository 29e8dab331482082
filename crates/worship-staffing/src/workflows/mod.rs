pub mod roster_import;
pub mod staffing;
