//! Page components

pub mod coffee_list;
pub mod login_mask;
pub mod not_found;

pub use coffee_list::CoffeeList;
pub use login_mask::LoginMask;
pub use not_found::NotFound;
