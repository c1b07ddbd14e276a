pub mod record;
pub mod reminder;
pub mod result;
pub mod risk;
