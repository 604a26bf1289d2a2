pub mod config;
pub mod crds;
pub mod deep_copy;
pub mod error;
pub mod object_list;
pub mod object_map;
pub mod watch_cache;
