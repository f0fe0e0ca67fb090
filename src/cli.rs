use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::PaymentStatus;
use crate::services::RecordKind;

#[derive(Parser)]
#[command(name = "fleet_compliance")]
#[command(about = "Fleet compliance records: drivers, vehicles, traffic fines and CNH alerts.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a user account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Start a session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage drivers
    #[command(subcommand)]
    Driver(DriverCommand),
    /// Manage vehicles
    #[command(subcommand)]
    Vehicle(VehicleCommand),
    /// Browse the infraction code catalog
    #[command(subcommand)]
    Code(CodeCommand),
    /// Manage traffic fines
    #[command(subcommand)]
    Fine(FineCommand),
    /// Drivers whose CNH is expired or expires within 30 days
    Alerts {
        /// Evaluate as of this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Import records from documents (PDF, image, CSV or Excel)
    Import {
        /// drivers, vehicles, fines or codes
        kind: RecordKind,
        #[arg(required = true)]
        files: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum DriverCommand {
    /// Register a driver
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cpf: String,
        #[arg(long, default_value = "")]
        license_number: String,
        /// CNH validity (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long, default_value = "")]
        validity: String,
    },
    /// Edit a driver in place
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cpf: Option<String>,
        #[arg(long)]
        license_number: Option<String>,
        /// New validity; an empty value clears it
        #[arg(long)]
        validity: Option<String>,
    },
    /// List drivers with their CNH status
    List,
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// Register a vehicle
    Add {
        #[arg(long)]
        plate: String,
        #[arg(long)]
        renavam: String,
        #[arg(long, default_value = "")]
        chassis: String,
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long, default_value = "")]
        model: String,
        #[arg(long)]
        year: i32,
    },
    /// Edit a vehicle in place
    Update {
        id: Uuid,
        #[arg(long)]
        plate: Option<String>,
        #[arg(long)]
        renavam: Option<String>,
        #[arg(long)]
        chassis: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// List vehicles
    List,
}

#[derive(Subcommand)]
pub enum CodeCommand {
    /// List the catalog
    List,
    /// Look up one code
    Show { code: String },
}

#[derive(Args)]
pub struct NewFineArgs {
    /// Ticket number (auto de infração)
    #[arg(long)]
    pub ticket: String,
    #[arg(long)]
    pub plate: String,
    #[arg(long)]
    pub code: String,
    /// Infraction date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, default_value = "")]
    pub date: String,
    #[arg(long, conflicts_with = "driver_name")]
    pub driver_id: Option<Uuid>,
    #[arg(long)]
    pub driver_name: Option<String>,
    /// Used only when the code is not in the catalog
    #[arg(long)]
    pub description: Option<String>,
    /// Used only when the code is not in the catalog
    #[arg(long)]
    pub value: Option<Decimal>,
    /// Used only when the code is not in the catalog
    #[arg(long)]
    pub points: Option<u32>,
    #[arg(long, default_value = "")]
    pub organ: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long)]
    pub indicates_driver: bool,
    /// Pay double (NIC): value doubled, no points
    #[arg(long)]
    pub pay_double: bool,
    #[arg(long, default_value = "pending")]
    pub status: PaymentStatus,
    #[arg(long, default_value = "")]
    pub observations: String,
}

#[derive(Subcommand)]
pub enum FineCommand {
    /// Register a fine
    Add(NewFineArgs),
    /// List fines
    List,
    /// Fines assigned to a driver name
    Search { driver_name: String },
    /// Change the infraction code of a fine
    SetCode { id: Uuid, code: String },
    /// Turn pay-double on or off
    SetDouble {
        id: Uuid,
        #[arg(action = ArgAction::Set)]
        pay_double: bool,
    },
    /// Assign a driver to a fine, or clear it
    #[command(group(
        ArgGroup::new("driver_choice")
            .required(true)
            .args(["driver_id", "driver_name", "clear"])
    ))]
    SetDriver {
        id: Uuid,
        #[arg(long)]
        driver_id: Option<Uuid>,
        #[arg(long)]
        driver_name: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Change the payment status
    SetStatus { id: Uuid, status: PaymentStatus },
    /// Show or save the original document of an imported fine
    Document {
        id: Uuid,
        /// Write the document to this directory
        #[arg(long, conflicts_with = "data_url")]
        save_to: Option<String>,
        /// Print the document as a data: URL
        #[arg(long)]
        data_url: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn test_parse_fine_set_double() {
        let id = Uuid::new_v4();
        let cli = CommandLine::try_parse_from([
            "fleet_compliance",
            "fine",
            "set-double",
            &id.to_string(),
            "true",
        ])
        .unwrap();

        match cli.command {
            Commands::Fine(FineCommand::SetDouble { id: parsed, pay_double }) => {
                assert_eq!(parsed, id);
                assert!(pay_double);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_import() {
        let cli = CommandLine::try_parse_from([
            "fleet_compliance",
            "import",
            "codes",
            "tabela.csv",
            "extra.pdf",
        ])
        .unwrap();

        match cli.command {
            Commands::Import { kind, files } => {
                assert_eq!(kind, RecordKind::InfractionCodes);
                assert_eq!(files.len(), 2);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_set_driver_requires_a_choice() {
        let id = Uuid::new_v4().to_string();
        let missing = CommandLine::try_parse_from(["fleet_compliance", "fine", "set-driver", &id]);
        assert!(missing.is_err());

        let both = CommandLine::try_parse_from([
            "fleet_compliance",
            "fine",
            "set-driver",
            &id,
            "--driver-name",
            "Ana",
            "--clear",
        ]);
        assert!(both.is_err());

        let cli = CommandLine::try_parse_from(["fleet_compliance", "fine", "set-driver", &id, "--clear"])
            .unwrap();
        match cli.command {
            Commands::Fine(FineCommand::SetDriver {
                driver_id,
                driver_name,
                clear,
                ..
            }) => {
                assert!(clear);
                assert_eq!(driver_id, None);
                assert_eq!(driver_name, None);
            }
            _ => panic!("unexpected command"),
        }
    }
}
