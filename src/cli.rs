//! One-shot subcommands that drive the inventory client without the TUI

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;

use crate::api::HttpApi;
use crate::client::{ClientError, ClientResult, InventoryClient};
use crate::notify::{Answered, ConsoleNotifier, Dialog, Notifier, Severity, StdinDialog};
use crate::inventory::Inventory;
use crate::view::InventoryView;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all items with quantities and stock status
    List {
        /// Print items and stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a new item (or add to an existing item of the same name)
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Increase the quantity of an existing item
    Restock {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Set an item's quantity
    SetQty {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Check out AMOUNT of NAME, optionally to a recipient
    Checkout {
        name: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Recipient name or identifier
        #[arg(long = "to")]
        recipient: Option<String>,
    },

    /// Delete an item by name
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

type CliClient = InventoryClient<HttpApi, ConsoleNotifier>;

pub async fn run(command: Command, api: HttpApi) -> Result<ExitCode> {
    let mut client = InventoryClient::new(api, ConsoleNotifier);
    tracing::debug!("Using API at {}", client.api().base_url());

    let result = match command {
        Command::List { json } => match client.load().await {
            Ok(()) => {
                print_list(client.inventory(), json)?;
                Ok(())
            }
            Err(e) => Err(e),
        },
        Command::Add { name, quantity } => client.add(&name, &quantity).await.map(|_| ()),
        Command::Restock { name, quantity } => restock(&mut client, &name, &quantity).await,
        Command::SetQty { name, quantity } => set_quantity(&mut client, &name, &quantity).await,
        Command::Checkout { name, amount, recipient } => client
            .checkout(&name, &amount, recipient.as_deref())
            .await
            .map(|_| ()),
        Command::Delete { name, yes } => {
            let mut dialog: Box<dyn Dialog> = if yes {
                Box::new(Answered(true))
            } else {
                Box::new(StdinDialog)
            };
            delete_by_name(&mut client, &name, dialog.as_mut()).await
        }
    };

    Ok(exit_code(&result))
}

// Commands that resolve items by name need the current list first

async fn restock(client: &mut CliClient, name: &str, quantity: &str) -> ClientResult<()> {
    client.load().await?;
    client.restock(name, quantity).await?;
    Ok(())
}

async fn set_quantity(client: &mut CliClient, name: &str, quantity: &str) -> ClientResult<()> {
    client.load().await?;
    client.edit(name, quantity).await?;
    Ok(())
}

async fn delete_by_name(client: &mut CliClient, name: &str, dialog: &mut dyn Dialog) -> ClientResult<()> {
    client.load().await?;
    let id = match client.inventory().find_by_name(name) {
        Some(item) => item.id,
        None => {
            client.notifier_mut().notify("Item not found", Severity::Error);
            return Err(ClientError::NotFound(name.to_string()));
        }
    };
    client.delete(id, name, dialog).await
}

fn list_json(inventory: &Inventory) -> Result<String> {
    let output = serde_json::json!({
        "items": inventory.items(),
        "stats": inventory.stats(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn print_list(inventory: &Inventory, json: bool) -> Result<()> {
    if json {
        println!("{}", list_json(inventory)?);
        return Ok(());
    }

    let view = InventoryView::build(inventory);
    if view.is_empty() {
        println!("Inventory is empty.");
        return Ok(());
    }

    println!("Inventory:");
    for row in &view.rows {
        println!("- {}: {} ({})", row.display_name, row.quantity, row.status);
    }
    let stats = view.stats;
    println!(
        "\n{} items │ {} units │ {} low stock │ {} out of stock",
        stats.total_items, stats.total_quantity, stats.low_stock, stats.out_of_stock
    );
    Ok(())
}

/// A declined delete is not a failure
fn succeeded(result: &ClientResult<()>) -> bool {
    matches!(result, Ok(()) | Err(ClientError::Cancelled))
}

fn exit_code(result: &ClientResult<()>) -> ExitCode {
    if succeeded(result) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::inventory::Item;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_parse_checkout_with_recipient() {
        let cli = TestCli::try_parse_from(["swagtrackr", "checkout", "Pen", "3", "--to", "Alex"]).unwrap();
        match cli.command {
            Command::Checkout { name, amount, recipient } => {
                assert_eq!(name, "Pen");
                assert_eq!(amount, "3");
                assert_eq!(recipient.as_deref(), Some("Alex"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_negative_quantity_reaches_validation() {
        let cli = TestCli::try_parse_from(["swagtrackr", "add", "Pen", "-1"]).unwrap();
        assert!(matches!(cli.command, Command::Add { ref quantity, .. } if quantity == "-1"));
    }

    #[test]
    fn test_set_qty_is_kebab_case() {
        let cli = TestCli::try_parse_from(["swagtrackr", "set-qty", "Pen", "9"]).unwrap();
        assert!(matches!(cli.command, Command::SetQty { .. }));
    }

    #[test]
    fn test_list_json_has_items_and_stats() {
        let mut inventory = Inventory::new();
        inventory.replace(vec![
            Item { id: 1, name: "Pen".to_string(), quantity: 0 },
            Item { id: 2, name: "Shirt".to_string(), quantity: 40 },
        ]);

        let output: serde_json::Value = serde_json::from_str(&list_json(&inventory).unwrap()).unwrap();
        assert_eq!(output["items"][1]["name"], "Shirt");
        assert_eq!(output["items"][0]["quantity"], 0);
        assert_eq!(output["stats"]["total_quantity"], 40);
        assert_eq!(output["stats"]["out_of_stock"], 1);
    }

    #[test]
    fn test_declined_delete_is_not_a_failure() {
        assert!(succeeded(&Ok(())));
        assert!(succeeded(&Err(ClientError::Cancelled)));
        assert!(!succeeded(&Err(ClientError::NotFound("Pen".to_string()))));
        assert!(!succeeded(&Err(ClientError::Api(ApiError::Network("down".to_string())))));
    }
}
