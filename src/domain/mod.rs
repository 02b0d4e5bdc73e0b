pub mod model;
pub mod pager;
pub mod quiz;
pub mod search;
