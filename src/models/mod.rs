pub mod raw_record;
pub mod timestamp;
pub mod work_order;

pub use raw_record::*;
pub use work_order::*;
