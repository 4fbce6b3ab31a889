//! Interactive menu shell.
//!
//! Thin dispatcher over the inventory service: prompts, parses lines, prints.
//! All validation and mutation happens in the core; nothing here touches the
//! stores directly.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use stockroom_catalog::{Item, ItemField};
use stockroom_core::{ItemId, Money, OrderId};
use stockroom_persistence::{
    flush_service, load_service, DelimitedStore, FlatFileStore, JsonStore,
};
use stockroom_service::{InventoryService, ServiceConfig, StockReportKind};

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let mut args = std::env::args().skip(1);
    let dir = args.next().map(PathBuf::from).unwrap_or_else(|| ".".into());
    let store: Box<dyn FlatFileStore> = match args.next().as_deref() {
        Some("json") => Box::new(JsonStore::new(&dir)),
        Some("csv") | None => Box::new(DelimitedStore::new(&dir)),
        Some(other) => anyhow::bail!("unknown storage format: {other} (expected csv or json)"),
    };

    let mut service = load_service(store.as_ref(), ServiceConfig::default());
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!();
        println!("===== Inventory Management System =====");
        println!("1. Inventory Management");
        println!("2. Order Processing");
        println!("3. Generate Reports");
        println!("4. Exit");
        let Some(choice) = prompt(&mut input, "Enter your choice: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => inventory_menu(&mut input, &mut service)?,
            "2" => orders_menu(&mut input, &mut service)?,
            "3" => reports_menu(&mut input, &service)?,
            "4" => break,
            _ => println!("Invalid choice, try again."),
        }
    }

    match flush_service(&service, store.as_ref()) {
        Ok(()) => println!("State saved. Goodbye!"),
        Err(err) => println!("Could not save state: {err}"),
    }
    Ok(())
}

/// Print a label and read one trimmed line; `None` means end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn inventory_menu(input: &mut impl BufRead, service: &mut InventoryService) -> anyhow::Result<()> {
    loop {
        println!();
        println!("===== Inventory Management =====");
        println!("1. Add Item");
        println!("2. Restock Item (add or accumulate)");
        println!("3. Update Item");
        println!("4. Remove Item");
        println!("5. View All Items");
        println!("6. Search Item");
        println!("7. Back to Main Menu");
        let Some(choice) = prompt(input, "Enter your choice: ")? else {
            return Ok(());
        };
        let outcome = match choice.as_str() {
            "1" | "2" => add_item(input, service, choice == "2"),
            "3" => update_item(input, service),
            "4" => remove_item(input, service),
            "5" => {
                print_items(service.catalog().iter());
                Ok(())
            }
            "6" => search_item(input, service),
            "7" => return Ok(()),
            _ => {
                println!("Invalid choice, try again.");
                Ok(())
            }
        };
        if let Err(err) = outcome {
            println!("error: {err}");
        }
    }
}

fn add_item(
    input: &mut impl BufRead,
    service: &mut InventoryService,
    accumulate: bool,
) -> anyhow::Result<()> {
    let Some(id) = prompt(input, "Item ID: ")? else {
        return Ok(());
    };
    let Some(name) = prompt(input, "Item name: ")? else {
        return Ok(());
    };
    let Some(price) = prompt(input, "Unit price: ")? else {
        return Ok(());
    };
    let Some(quantity) = prompt(input, "Quantity: ")? else {
        return Ok(());
    };

    let item = Item::new(
        id.parse::<ItemId>()?,
        name,
        price.parse::<Money>()?,
        quantity.parse::<i64>()?,
    )?;
    if accumulate {
        service.catalog_mut().add_or_accumulate(item)?;
        println!("Stock updated.");
    } else {
        service.catalog_mut().add(item)?;
        println!("Item added.");
    }
    Ok(())
}

fn update_item(input: &mut impl BufRead, service: &mut InventoryService) -> anyhow::Result<()> {
    let Some(id) = prompt(input, "Item ID to update: ")? else {
        return Ok(());
    };
    let Some(field) = prompt(input, "Field to update (name/price/quantity): ")? else {
        return Ok(());
    };
    let Some(value) = prompt(input, "New value: ")? else {
        return Ok(());
    };
    service
        .catalog_mut()
        .update(&id.parse::<ItemId>()?, ItemField::parse(&field, &value)?)?;
    println!("Item updated.");
    Ok(())
}

fn remove_item(input: &mut impl BufRead, service: &mut InventoryService) -> anyhow::Result<()> {
    let Some(id) = prompt(input, "Item ID to remove: ")? else {
        return Ok(());
    };
    let removed = service.catalog_mut().remove(&id.parse::<ItemId>()?)?;
    println!("Removed {}.", removed.name());
    Ok(())
}

fn search_item(input: &mut impl BufRead, service: &InventoryService) -> anyhow::Result<()> {
    let Some(query) = prompt(input, "Item ID or name to search: ")? else {
        return Ok(());
    };
    let item = service.catalog().search(&query)?;
    print_items(std::iter::once(item));
    Ok(())
}

fn orders_menu(input: &mut impl BufRead, service: &mut InventoryService) -> anyhow::Result<()> {
    loop {
        println!();
        println!("===== Order Processing =====");
        println!("1. Create Order");
        println!("2. Process Next Order");
        println!("3. View Pending Orders");
        println!("4. Cancel Order");
        println!("5. Back to Main Menu");
        let Some(choice) = prompt(input, "Enter your choice: ")? else {
            return Ok(());
        };
        let outcome = match choice.as_str() {
            "1" => create_order(input, service),
            "2" => process_next(service),
            "3" => {
                view_pending(service);
                Ok(())
            }
            "4" => cancel_order(input, service),
            "5" => return Ok(()),
            _ => {
                println!("Invalid choice, try again.");
                Ok(())
            }
        };
        if let Err(err) = outcome {
            println!("error: {err}");
        }
    }
}

fn create_order(input: &mut impl BufRead, service: &mut InventoryService) -> anyhow::Result<()> {
    let Some(order_id) = prompt(input, "Order ID: ")? else {
        return Ok(());
    };
    let Some(customer) = prompt(input, "Customer name: ")? else {
        return Ok(());
    };

    let mut requests = Vec::new();
    loop {
        let Some(item_id) = prompt(input, "Item ID to add (or 'done' to finish): ")? else {
            break;
        };
        if item_id.eq_ignore_ascii_case("done") {
            break;
        }
        let Some(quantity) = prompt(input, "Quantity: ")? else {
            break;
        };
        requests.push((item_id.parse::<ItemId>()?, quantity.parse::<i64>()?));
    }

    let submission = service.submit(order_id.parse::<OrderId>()?, customer, requests)?;
    println!(
        "Order {} queued with {} line(s).",
        submission.order_id, submission.accepted_lines
    );
    for dropped in &submission.dropped {
        println!("  dropped invalid line for item {dropped}");
    }
    Ok(())
}

fn process_next(service: &mut InventoryService) -> anyhow::Result<()> {
    let receipt = service.process_next()?;
    println!(
        "Processed order {} for {}: {} line(s), total {}.",
        receipt.order_id, receipt.customer_name, receipt.lines_fulfilled, receipt.total_cost
    );
    Ok(())
}

fn view_pending(service: &InventoryService) {
    println!();
    println!("Pending orders:");
    for order in service.pending_orders() {
        let lines: Vec<String> = order
            .lines()
            .iter()
            .map(|l| format!("{} x{}", l.item_id, l.quantity))
            .collect();
        println!(
            "{} | {} | {}",
            order.id(),
            order.customer_name(),
            lines.join(", ")
        );
    }
}

fn cancel_order(input: &mut impl BufRead, service: &mut InventoryService) -> anyhow::Result<()> {
    let Some(id) = prompt(input, "Order ID to cancel: ")? else {
        return Ok(());
    };
    service.cancel_order(&id.parse::<OrderId>()?)?;
    println!("Order cancelled.");
    Ok(())
}

fn reports_menu(input: &mut impl BufRead, service: &InventoryService) -> anyhow::Result<()> {
    loop {
        println!();
        println!("===== Reports =====");
        println!("1. Low Stock Report");
        println!("2. Full Stock Report");
        println!("3. Empty Stock Report");
        println!("4. All Items");
        println!("5. Sales Report");
        println!("6. Back to Main Menu");
        let Some(choice) = prompt(input, "Enter your choice: ")? else {
            return Ok(());
        };
        let kind = match choice.as_str() {
            "1" => StockReportKind::LowStock,
            "2" => StockReportKind::FullStock,
            "3" => StockReportKind::EmptyStock,
            "4" => StockReportKind::AllItems,
            "5" => {
                print_sales(service);
                continue;
            }
            "6" => return Ok(()),
            _ => {
                println!("Invalid choice, try again.");
                continue;
            }
        };
        let report = service.stock_report(kind);
        print_items(report.iter());
    }
}

fn print_items<'a>(items: impl Iterator<Item = &'a Item>) {
    println!();
    println!("ID | Name | Price | Quantity");
    println!("--------------------------------");
    let mut any = false;
    for item in items {
        any = true;
        println!(
            "{} | {} | {} | {}",
            item.id(),
            item.name(),
            item.unit_price(),
            item.quantity_on_hand()
        );
    }
    if !any {
        println!("(none)");
    }
}

fn print_sales(service: &InventoryService) {
    println!();
    println!("Sales history:");
    for sale in service.sales_report() {
        println!(
            "Item {} ({}) | sold {} | total {}",
            sale.item_id, sale.item_name, sale.quantity_sold, sale.total_price
        );
    }
    if service.sales_report().is_empty() {
        println!("(none)");
    }
}
