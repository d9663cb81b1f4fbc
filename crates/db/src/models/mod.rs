pub mod artist;
pub mod character;
