/// species dictionaries on disk
pub mod load_from_file;
pub mod logger;
