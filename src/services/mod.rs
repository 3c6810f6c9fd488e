pub mod availability_service;
pub mod blocked_dates;
pub mod pricing_service;
pub mod reservation_service;
