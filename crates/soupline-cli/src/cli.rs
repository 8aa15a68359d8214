use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use soupline_sdk::{DonationKind, PaymentMethod};

pub const DEFAULT_DATA_DIR: &str = "soupline-data";

#[derive(Parser)]
#[command(
    name = "soupline",
    about = "Soupline - soup kitchen donations, inventory and staff",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the JSON collections
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

impl Cli {
    pub fn data_dir(&self) -> PathBuf {
        self.data.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP dashboard server
    Serve(ServeArgs),
    /// Show dashboard totals
    Stats,
    /// Register and inspect donors
    Donor {
        #[command(subcommand)]
        action: DonorAction,
    },
    /// Record and remove donations
    Donation {
        #[command(subcommand)]
        action: DonationAction,
    },
    /// Inspect the inventory
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },
    /// Hire and list staff
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Print an Argon2 hash for a server config `password_hash`
    HashPassword { password: String },
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML server config
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides `bind_addr` from the config
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Subcommand)]
pub enum DonorAction {
    Add(DonorAddArgs),
    List,
    /// Donations made by one donor
    History { id: String },
}

#[derive(Args)]
pub struct DonorAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub phone: String,
}

#[derive(Subcommand)]
pub enum DonationAction {
    Add(DonationAddArgs),
    List,
    Remove { id: String },
}

#[derive(Args)]
pub struct DonationAddArgs {
    #[arg(long)]
    pub donor: String,
    #[arg(long, value_enum)]
    pub kind: KindArg,
    /// Money for monetary donations, whole units for in-kind
    #[arg(long)]
    pub amount: f64,
    /// Product category, required for in-kind donations
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_enum, default_value = "cash")]
    pub method: MethodArg,
    /// Defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    Monetary,
    InKind,
}

impl From<KindArg> for DonationKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Monetary => Self::Monetary,
            KindArg::InKind => Self::InKind,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum MethodArg {
    Cash,
    Transfer,
    Check,
    Other,
}

impl From<MethodArg> for PaymentMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Cash => Self::Cash,
            MethodArg::Transfer => Self::Transfer,
            MethodArg::Check => Self::Check,
            MethodArg::Other => Self::Other,
        }
    }
}

#[derive(Subcommand)]
pub enum InventoryAction {
    List,
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    Add(EmployeeAddArgs),
    List,
}

#[derive(Args)]
pub struct EmployeeAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub position: String,
    #[arg(long)]
    pub salary: f64,
    #[arg(long, default_value = "")]
    pub shift: String,
    #[arg(long, default_value = "")]
    pub emergency_contact: String,
    /// Defaults to today
    #[arg(long)]
    pub hire_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stats() {
        let cli = Cli::try_parse_from(["soupline", "stats"]).unwrap();
        assert!(matches!(cli.command, Command::Stats));
        assert_eq!(cli.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn parse_global_data_after_subcommand() {
        let cli = Cli::try_parse_from(["soupline", "donor", "list", "--data", "/tmp/k"]).unwrap();
        assert_eq!(cli.data_dir(), PathBuf::from("/tmp/k"));
    }

    #[test]
    fn parse_donor_add() {
        let cli = Cli::try_parse_from([
            "soupline", "donor", "add", "--name", "Ana Ruiz", "--email", "ana@example.org",
        ])
        .unwrap();
        if let Command::Donor { action: DonorAction::Add(args) } = cli.command {
            assert_eq!(args.name, "Ana Ruiz");
            assert_eq!(args.email, "ana@example.org");
            assert_eq!(args.phone, "");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_donation_add_in_kind() {
        let cli = Cli::try_parse_from([
            "soupline", "donation", "add", "--donor", "abc", "--kind", "in-kind",
            "--amount", "12", "--category", "Rice", "--date", "2024-05-01",
        ])
        .unwrap();
        if let Command::Donation { action: DonationAction::Add(args) } = cli.command {
            assert_eq!(args.kind, KindArg::InKind);
            assert_eq!(DonationKind::from(args.kind), DonationKind::InKind);
            assert_eq!(args.amount, 12.0);
            assert_eq!(args.category.as_deref(), Some("Rice"));
            assert_eq!(args.method, MethodArg::Cash);
            assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn reject_unknown_kind() {
        assert!(Cli::try_parse_from([
            "soupline", "donation", "add", "--donor", "abc", "--kind", "barter", "--amount", "1",
        ])
        .is_err());
    }

    #[test]
    fn parse_donation_remove() {
        let cli = Cli::try_parse_from(["soupline", "donation", "remove", "xyz"]).unwrap();
        if let Command::Donation { action: DonationAction::Remove { id } } = cli.command {
            assert_eq!(id, "xyz");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["soupline", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
            assert!(args.config.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_hash_password() {
        let cli = Cli::try_parse_from(["soupline", "hash-password", "s3cret"]).unwrap();
        assert!(matches!(cli.command, Command::HashPassword { password } if password == "s3cret"));
    }

    #[test]
    fn parse_json_format() {
        let cli =
            Cli::try_parse_from(["soupline", "--format", "json", "inventory", "list"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
