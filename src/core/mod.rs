pub mod country;
pub mod quote;
pub mod request;
pub mod route;
