pub mod difficulty;
pub mod float_ext;
pub mod limited_queue;
pub mod pos;
