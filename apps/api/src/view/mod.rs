pub mod controller;
pub mod handlers;
pub mod page;
pub mod pager;
