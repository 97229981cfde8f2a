use clap::{Args, Subcommand};

use super::OutputFormat;
use gofood::config::Config;
use gofood::{Dashboard, FoodPlate, FoodPlateInput, HttpFoodsApi, TerminalAlerts};

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// List all food plates
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Only show plates that are currently available
        #[arg(long)]
        available: bool,
    },

    /// Show a food plate's details
    Show {
        /// Food plate ID
        id: u64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new food plate
    Add {
        /// Name of the plate
        name: String,

        /// Price, e.g. 19.90
        #[arg(long)]
        price: String,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,

        /// Description shown on the menu
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit an existing food plate
    Edit {
        /// Food plate ID
        id: u64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<String>,

        /// New image URL
        #[arg(long)]
        image: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a food plate
    Delete {
        /// Food plate ID
        id: u64,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Flip a food plate between available and unavailable
    Toggle {
        /// Food plate ID
        id: u64,
    },
}

impl FoodCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let force = matches!(self.command, FoodSubcommand::Delete { force: true, .. });
        let api = HttpFoodsApi::new(config.api_url.value.clone());
        let alerts = TerminalAlerts::new().assume_yes(force);

        let mut dashboard = Dashboard::new(api, alerts);
        dashboard.mount().await?;

        match &self.command {
            FoodSubcommand::List { format, available } => {
                let foods: Vec<&FoodPlate> = dashboard
                    .foods()
                    .iter()
                    .filter(|f| !*available || f.available)
                    .collect();

                if foods.is_empty() {
                    println!("No food plates found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&foods)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<6}  {:<30}  {:>10}  STATUS", "ID", "NAME", "PRICE");
                        println!("{}", "-".repeat(64));
                        for food in &foods {
                            let name = if food.name.chars().count() > 30 {
                                format!("{}...", food.name.chars().take(27).collect::<String>())
                            } else {
                                food.name.clone()
                            };
                            let status = if food.available {
                                "available"
                            } else {
                                "unavailable"
                            };
                            println!(
                                "{:<6}  {:<30}  {:>10}  {}",
                                food.id, name, food.price, status
                            );
                        }
                        println!("\nTotal: {} plate(s)", foods.len());
                    }
                }
                Ok(())
            }

            FoodSubcommand::Show { id, format } => {
                let food = dashboard
                    .find(*id)
                    .ok_or_else(|| format!("Food plate not found: {}", id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(food)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", food);
                    }
                }
                Ok(())
            }

            FoodSubcommand::Add {
                name,
                price,
                image,
                description,
            } => {
                if name.trim().is_empty() {
                    return Err("Food plate name cannot be empty".into());
                }

                let input = FoodPlateInput::new(name.trim(), price.trim())
                    .with_image(image.trim())
                    .with_description(description.trim());

                dashboard.toggle_add();
                let result = dashboard.request_add(input).await;
                dashboard.toggle_add();

                let created = result?;
                println!();
                print!("{}", created);
                Ok(())
            }

            FoodSubcommand::Edit {
                id,
                name,
                price,
                image,
                description,
            } => {
                let has_updates =
                    name.is_some() || price.is_some() || image.is_some() || description.is_some();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let mut input = dashboard
                    .find(*id)
                    .map(FoodPlate::to_input)
                    .ok_or_else(|| format!("Food plate not found: {}", id))?;

                if let Some(name) = name {
                    input.name = name.clone();
                }
                if let Some(price) = price {
                    input.price = price.clone();
                }
                if let Some(image) = image {
                    input.image = image.clone();
                }
                if let Some(description) = description {
                    input.description = description.clone();
                }

                dashboard.select_for_edit_by_id(*id)?;
                let result = dashboard.request_update(input).await;
                dashboard.toggle_edit();

                let updated = result?;
                println!();
                print!("{}", updated);
                Ok(())
            }

            FoodSubcommand::Delete { id, .. } => {
                if dashboard.find(*id).is_none() {
                    return Err(format!("Food plate not found: {}", id).into());
                }

                dashboard.request_delete(*id).await?;
                Ok(())
            }

            FoodSubcommand::Toggle { id } => {
                let updated = dashboard.toggle_available(*id).await?;
                println!(
                    "{} is now {}",
                    updated.name,
                    if updated.available {
                        "available"
                    } else {
                        "unavailable"
                    }
                );
                Ok(())
            }
        }
    }
}
