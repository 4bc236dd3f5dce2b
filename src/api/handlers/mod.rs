pub mod files;
pub mod health;
pub mod index;
pub mod legacy;
