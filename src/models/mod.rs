mod food;

pub use food::{FoodPlate, FoodPlateInput, NewFoodPlate};
