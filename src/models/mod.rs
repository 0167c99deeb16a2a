pub mod enums;
pub mod item;
pub mod scale;

pub use enums::*;
pub use item::*;
pub use scale::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
