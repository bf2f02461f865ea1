pub mod ls_files;
pub mod repo;
