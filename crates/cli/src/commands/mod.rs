pub mod migrate;
pub mod rollback;
pub mod status;
