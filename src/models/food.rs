use serde::{Deserialize, Serialize};
use std::fmt;

/// A single entry on the menu, as stored by the `/foods` resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodPlate {
    pub id: u64,
    pub name: String,
    pub image: String,
    pub price: String, // decimal-formatted, e.g. "19.90"
    pub description: String,
    pub available: bool,
}

impl FoodPlate {
    /// Builds a plate from form fields. New plates start out available.
    pub fn from_input(id: u64, input: FoodPlateInput) -> Self {
        Self {
            id,
            name: input.name,
            image: input.image,
            price: input.price,
            description: input.description,
            available: true,
        }
    }

    /// Overlays edited form fields on this plate. The id and availability
    /// are kept.
    pub fn merged_with(&self, input: &FoodPlateInput) -> Self {
        Self {
            id: self.id,
            name: input.name.clone(),
            image: input.image.clone(),
            price: input.price.clone(),
            description: input.description.clone(),
            available: self.available,
        }
    }

    /// Returns the same plate with `available` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            available: !self.available,
            ..self.clone()
        }
    }

    /// The form fields of this plate, used to prefill the edit form.
    pub fn to_input(&self) -> FoodPlateInput {
        FoodPlateInput {
            name: self.name.clone(),
            image: self.image.clone(),
            price: self.price.clone(),
            description: self.description.clone(),
        }
    }
}

impl fmt::Display for FoodPlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Price: R$ {}", self.price)?;
        writeln!(
            f,
            "Status: {}",
            if self.available {
                "available"
            } else {
                "unavailable"
            }
        )?;

        if !self.image.is_empty() {
            writeln!(f, "Image: {}", self.image)?;
        }

        if !self.description.is_empty() {
            writeln!(f, "\n{}", self.description)?;
        }

        Ok(())
    }
}

/// Fields submitted by the add and edit forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FoodPlateInput {
    pub name: String,
    pub image: String,
    pub price: String,
    pub description: String,
}

impl FoodPlateInput {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Body of `POST /foods` and `PUT /foods/{id}`: the form fields plus the
/// availability flag. Any `id` in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewFoodPlate {
    #[serde(flatten)]
    pub fields: FoodPlateInput,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

impl From<FoodPlateInput> for NewFoodPlate {
    fn from(fields: FoodPlateInput) -> Self {
        Self {
            fields,
            available: true,
        }
    }
}
