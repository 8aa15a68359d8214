use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use soupline_sdk::{
    Change, Donation, Effect, FileBackend, Kitchen, NewDonation, NewDonor, NewEmployee,
    RecordId, SkipReason, SyncReport,
};
use soupline_server::{hash_password, ServerConfig, SouplineServer};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let data = cli.data_dir();
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(cli.data, args),
        Command::Stats => cmd_stats(&data, format),
        Command::Donor { action } => match action {
            DonorAction::Add(args) => cmd_donor_add(&data, format, args),
            DonorAction::List => cmd_donor_list(&data, format),
            DonorAction::History { id } => cmd_donor_history(&data, format, &id),
        },
        Command::Donation { action } => match action {
            DonationAction::Add(args) => cmd_donation_add(&data, format, args),
            DonationAction::List => cmd_donation_list(&data, format),
            DonationAction::Remove { id } => cmd_donation_remove(&data, format, &id),
        },
        Command::Inventory { action: InventoryAction::List } => cmd_inventory_list(&data, format),
        Command::Employee { action } => match action {
            EmployeeAction::Add(args) => cmd_employee_add(&data, format, args),
            EmployeeAction::List => cmd_employee_list(&data, format),
        },
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
            Ok(())
        }
    }
}

fn open_kitchen(data: &Path) -> anyhow::Result<Kitchen> {
    let backend = FileBackend::open(data)
        .with_context(|| format!("cannot open data directory {}", data.display()))?;
    Kitchen::open(backend).with_context(|| format!("cannot load records from {}", data.display()))
}

fn parse_id(raw: &str) -> anyhow::Result<RecordId> {
    raw.parse().with_context(|| format!("'{raw}' is not a record id"))
}

/// Print `value` as JSON, or run `text` for the human format.
fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce()) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(),
    }
    Ok(())
}

fn cmd_serve(data: Option<PathBuf>, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("cannot read config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind.parse().with_context(|| format!("invalid bind address '{bind}'"))?;
    }
    config.data_dir = data
        .or(config.data_dir)
        .or_else(|| Some(PathBuf::from(DEFAULT_DATA_DIR)));

    let server = SouplineServer::new(config)?;
    println!("Soupline server on {}", server.config().bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_stats(data: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let stats = open_kitchen(data)?.stats();
    emit(format, &stats, || {
        println!("{}", "Dashboard".bold());
        println!("  Donors:          {}", stats.total_donors);
        println!(
            "  Donations:       {} ({} monetary, {} in-kind)",
            stats.total_donations, stats.total_monetary, stats.total_in_kind
        );
        println!("  Inventory units: {}", stats.total_inventory);
        println!(
            "  Employees:       {} ({} active)",
            stats.total_employees, stats.active_employees
        );
    })
}

fn cmd_donor_add(data: &Path, format: OutputFormat, args: DonorAddArgs) -> anyhow::Result<()> {
    let mut kitchen = open_kitchen(data)?;
    let donor = kitchen.add_donor(NewDonor {
        full_name: args.name,
        address: args.address,
        phone: args.phone,
        email: args.email,
    })?;
    emit(format, &donor, || {
        println!(
            "{} Added donor {} ({})",
            "✓".green().bold(),
            donor.full_name.bold(),
            donor.id.to_string().yellow()
        );
    })
}

fn cmd_donor_list(data: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let kitchen = open_kitchen(data)?;
    let donors = kitchen.donors();
    emit(format, &donors, || {
        if donors.is_empty() {
            println!("No donors.");
        }
        for donor in donors {
            println!(
                "{}  {} <{}>",
                donor.id.to_string().yellow(),
                donor.full_name.bold(),
                donor.email
            );
        }
    })
}

fn cmd_donor_history(data: &Path, format: OutputFormat, id: &str) -> anyhow::Result<()> {
    let kitchen = open_kitchen(data)?;
    let id = parse_id(id)?;
    let donor = kitchen.get_donor(&id)?;
    let history = kitchen.donor_history(&id)?;
    emit(format, &history, || {
        println!("History for {}", donor.full_name.bold());
        if history.is_empty() {
            println!("  No donations.");
        }
        for donation in &history {
            print_donation(donation);
        }
    })
}

fn cmd_donation_add(
    data: &Path,
    format: OutputFormat,
    args: DonationAddArgs,
) -> anyhow::Result<()> {
    let mut kitchen = open_kitchen(data)?;
    let synced = kitchen.add_donation(NewDonation {
        donor_id: parse_id(&args.donor)?,
        date: args.date.unwrap_or_else(|| Utc::now().date_naive()),
        kind: args.kind.into(),
        amount: args.amount,
        product_category: args.category,
        method: args.method.into(),
        status: Default::default(),
        description: args.description,
    })?;
    emit(format, &synced.report, || {
        println!(
            "{} Recorded donation {}",
            "✓".green().bold(),
            synced.donation.id.to_string().yellow()
        );
        print_report(&synced.report);
    })
}

fn cmd_donation_list(data: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let kitchen = open_kitchen(data)?;
    let donations = kitchen.donations();
    emit(format, &donations, || {
        if donations.is_empty() {
            println!("No donations.");
        }
        for donation in donations {
            print_donation(donation);
        }
    })
}

fn cmd_donation_remove(data: &Path, format: OutputFormat, id: &str) -> anyhow::Result<()> {
    let mut kitchen = open_kitchen(data)?;
    let synced = kitchen.remove_donation(&parse_id(id)?)?;
    emit(format, &synced.report, || {
        println!(
            "{} Removed donation {}",
            "✓".green().bold(),
            synced.donation.id.to_string().yellow()
        );
        print_report(&synced.report);
    })
}

fn cmd_inventory_list(data: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let kitchen = open_kitchen(data)?;
    let items = kitchen.inventory();
    emit(format, &items, || {
        if items.is_empty() {
            println!("Inventory is empty.");
        }
        for item in items {
            let origin = match &item.donation_id {
                Some(id) => format!(" (donation {})", id.short_id()).dimmed().to_string(),
                None => String::new(),
            };
            println!(
                "{}  {} x{} [{}]{}",
                item.id.to_string().yellow(),
                item.name.bold(),
                item.quantity,
                item.category.cyan(),
                origin
            );
        }
    })
}

fn cmd_employee_add(
    data: &Path,
    format: OutputFormat,
    args: EmployeeAddArgs,
) -> anyhow::Result<()> {
    let mut kitchen = open_kitchen(data)?;
    let employee = kitchen.add_employee(NewEmployee {
        full_name: args.name,
        position: args.position,
        shift: args.shift,
        emergency_contact: args.emergency_contact,
        salary: args.salary,
        status: Default::default(),
        hire_date: args.hire_date.unwrap_or_else(|| Utc::now().date_naive()),
    })?;
    emit(format, &employee, || {
        println!(
            "{} Hired {} as {}",
            "✓".green().bold(),
            employee.full_name.bold(),
            employee.position
        );
    })
}

fn cmd_employee_list(data: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let kitchen = open_kitchen(data)?;
    let employees = kitchen.employees();
    emit(format, &employees, || {
        if employees.is_empty() {
            println!("No employees.");
        }
        for e in employees {
            let status = if e.is_active() { "active".green() } else { "inactive".dimmed() };
            println!(
                "{}  {} - {} ({})",
                e.id.to_string().yellow(),
                e.full_name.bold(),
                e.position,
                status
            );
        }
    })
}

fn print_donation(d: &Donation) {
    let what = match d.category() {
        Some(category) if d.is_in_kind() => format!("{} x {}", d.unit_count(), category.cyan()),
        _ => format!("{:.2}", d.amount),
    };
    println!("{}  {}  {}", d.id.to_string().yellow(), d.date, what);
}

fn print_report(report: &SyncReport) {
    for effect in &report.effects {
        match effect {
            Effect::Applied(change) => println!("  {} {}", "✓".green(), describe_change(change)),
            Effect::Skipped(reason) => {
                println!("  {} {}", "!".yellow().bold(), describe_skip(reason))
            }
        }
    }
}

fn describe_change(change: &Change) -> String {
    match change {
        Change::ItemCreated { item_id, quantity } => {
            format!("inventory item {} created with {quantity} units", item_id.short_id())
        }
        Change::ItemUpdated { item_id, quantity } => {
            format!("inventory item {} now holds {quantity} units", item_id.short_id())
        }
        Change::ItemRemoved { item_id } => format!("inventory item {} removed", item_id.short_id()),
        Change::HistoryAppended { donor_id } => {
            format!("added to history of donor {}", donor_id.short_id())
        }
        Change::HistoryUpdated { donor_id } => {
            format!("history of donor {} updated", donor_id.short_id())
        }
        Change::HistoryRemoved { donor_id } => {
            format!("removed from history of donor {}", donor_id.short_id())
        }
    }
}

fn describe_skip(reason: &SkipReason) -> String {
    match reason {
        SkipReason::DonorNotFound { donor_id } => format!("donor {donor_id} not found"),
        SkipReason::NoLinkedItem => "no linked inventory item".into(),
    }
}
