pub mod navbar;

pub use navbar::{Navbar, NavbarProps};
