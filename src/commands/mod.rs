use clap::ValueEnum;

mod config_cmd;
mod food;

pub use config_cmd::ConfigCommand;
pub use food::FoodCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
