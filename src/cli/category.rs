//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_table};
use crate::error::MoneyTrackResult;
use crate::models::CATEGORY_COLOR_PALETTE;
use crate::services::{CategoryService, UpdateCategoryInput};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their expense counts
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Color as #RRGGBB
        #[arg(long)]
        color: Option<String>,
        /// Icon name
        #[arg(long)]
        icon: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color as #RRGGBB
        #[arg(long)]
        color: Option<String>,
        /// New icon name
        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a category no expense uses
    Delete {
        /// Category name or ID
        category: String,
    },

    /// List the suggested category colors
    Colors,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> MoneyTrackResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let rows = service
                .list()?
                .into_iter()
                .map(|category| {
                    let count = service.usage_count(category.id)?;
                    Ok((category, count))
                })
                .collect::<MoneyTrackResult<Vec<_>>>()?;
            print!("{}", format_category_table(&rows));
        }

        CategoryCommands::Create { name, color, icon } => {
            let category = service.create(&name, color.as_deref(), icon.as_deref())?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let category = service.require(&category)?;
            let count = service.usage_count(category.id)?;
            print!("{}", format_category_details(&category, count));
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
            icon,
        } => {
            let category = service.require(&category)?;

            if name.is_none() && color.is_none() && icon.is_none() {
                println!("No changes specified. Use --name, --color, or --icon.");
                return Ok(());
            }

            let updated = service.update(category.id, UpdateCategoryInput { name, color, icon })?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let category = service.require(&category)?;
            service.delete(category.id)?;
            println!("Deleted category: {}", category.name);
        }

        CategoryCommands::Colors => {
            for color in CATEGORY_COLOR_PALETTE {
                println!("{}", color);
            }
        }
    }

    Ok(())
}
