pub mod contact;
pub mod shared;
