pub mod health;
pub mod object;
