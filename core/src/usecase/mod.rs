pub mod planner;
pub mod reminder;

mod planner_test;
