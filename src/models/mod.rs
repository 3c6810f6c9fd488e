pub mod availability;
pub mod date_range;
pub mod reservation;
pub mod room;
pub mod selection;
