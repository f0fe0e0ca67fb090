use anyhow::Result;
use dotenvy::dotenv;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use fleet_compliance::cli::{
    CodeCommand, CommandLine, Commands, DriverCommand, FineCommand, NewFineArgs, VehicleCommand,
};
use fleet_compliance::config::AppConfig;
use fleet_compliance::controllers::driver_controller::DriverChanges;
use fleet_compliance::controllers::fine_controller::DocumentOutput;
use fleet_compliance::controllers::vehicle_controller::VehicleChanges;
use fleet_compliance::controllers::{
    auth_controller, code_controller, driver_controller, fine_controller, import_controller,
    vehicle_controller,
};
use fleet_compliance::models::{
    CreateDriverRequest, CreateFineRequest, CreateVehicleRequest, DriverRef, RegisterUserRequest,
};
use fleet_compliance::state::AppState;
use fleet_compliance::utils::errors::AppResult;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let commands = CommandLine::parse_args();
    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!(e.user_message()))?;

    // Configurar logging (stderr, la salida de los comandos va a stdout)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🚛 Fleet compliance ({})", config.environment);

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error abriendo el record store: {}", e);
            return Err(anyhow::anyhow!(e.user_message()));
        }
    };
    debug!("🗄️ Backend: {}", state.store.backend_name());

    match run(&state, commands.command).await {
        Ok(output) => {
            println!("{}", output.trim_end());
            Ok(())
        }
        Err(e) => {
            error!("❌ {} ({})", e, e.code());
            Err(anyhow::anyhow!(e.user_message()))
        }
    }
}

async fn run(state: &AppState, command: Commands) -> AppResult<String> {
    match command {
        Commands::Register {
            username,
            password,
            name,
        } => auth_controller::register(
            state,
            RegisterUserRequest {
                username,
                password,
                name,
            },
        ),
        Commands::Login { username, password } => auth_controller::login(state, &username, &password),
        Commands::Logout => auth_controller::logout(state),
        Commands::Whoami => auth_controller::whoami(state),
        Commands::Driver(command) => run_driver(state, command),
        Commands::Vehicle(command) => run_vehicle(state, command),
        Commands::Code(CodeCommand::List) => code_controller::list(state),
        Commands::Code(CodeCommand::Show { code }) => code_controller::show(state, &code),
        Commands::Fine(command) => run_fine(state, command),
        Commands::Alerts { as_of } => driver_controller::alerts(state, as_of.as_deref()),
        Commands::Import { kind, files } => import_controller::import(state, kind, &files).await,
    }
}

fn run_driver(state: &AppState, command: DriverCommand) -> AppResult<String> {
    match command {
        DriverCommand::Add {
            name,
            cpf,
            license_number,
            validity,
        } => driver_controller::add(
            state,
            CreateDriverRequest {
                name,
                cpf,
                license_number,
                validity_date: validity,
            },
        ),
        DriverCommand::Update {
            id,
            name,
            cpf,
            license_number,
            validity,
        } => driver_controller::update(
            state,
            id,
            DriverChanges {
                name,
                cpf,
                license_number,
                validity,
            },
        ),
        DriverCommand::List => driver_controller::list(state),
    }
}

fn run_vehicle(state: &AppState, command: VehicleCommand) -> AppResult<String> {
    match command {
        VehicleCommand::Add {
            plate,
            renavam,
            chassis,
            brand,
            model,
            year,
        } => vehicle_controller::add(
            state,
            CreateVehicleRequest {
                plate,
                renavam,
                chassis,
                brand,
                model,
                year,
            },
        ),
        VehicleCommand::Update {
            id,
            plate,
            renavam,
            chassis,
            brand,
            model,
            year,
        } => vehicle_controller::update(
            state,
            id,
            VehicleChanges {
                plate,
                renavam,
                chassis,
                brand,
                model,
                year,
            },
        ),
        VehicleCommand::List => vehicle_controller::list(state),
    }
}

fn fine_request(args: NewFineArgs) -> CreateFineRequest {
    let driver = match (args.driver_id, args.driver_name) {
        (Some(id), _) => Some(DriverRef::Id(id)),
        (None, Some(name)) => Some(DriverRef::Name(name)),
        (None, None) => None,
    };

    CreateFineRequest {
        ticket_number: args.ticket,
        plate: args.plate,
        code: args.code,
        date: args.date,
        driver,
        description: args.description,
        value: args.value,
        points: args.points,
        issuing_authority: args.organ,
        location: args.location,
        indicates_driver: args.indicates_driver,
        pay_double: args.pay_double,
        payment_status: args.status,
        observations: args.observations,
        attachment: None,
    }
}

fn run_fine(state: &AppState, command: FineCommand) -> AppResult<String> {
    match command {
        FineCommand::Add(args) => fine_controller::add(state, fine_request(args)),
        FineCommand::List => fine_controller::list(state),
        FineCommand::Search { driver_name } => fine_controller::search(state, &driver_name),
        FineCommand::SetCode { id, code } => fine_controller::set_code(state, id, &code),
        FineCommand::SetDouble { id, pay_double } => {
            fine_controller::set_pay_double(state, id, pay_double)
        }
        FineCommand::SetDriver {
            id,
            driver_id,
            driver_name,
            clear,
        } => {
            let driver = if clear {
                None
            } else {
                match (driver_id, driver_name) {
                    (Some(driver_id), _) => Some(DriverRef::Id(driver_id)),
                    (None, Some(name)) => Some(DriverRef::Name(name)),
                    (None, None) => None,
                }
            };
            fine_controller::set_driver(state, id, driver)
        }
        FineCommand::SetStatus { id, status } => fine_controller::set_status(state, id, status),
        FineCommand::Document {
            id,
            save_to,
            data_url,
        } => {
            let output = match (save_to.as_deref(), data_url) {
                (Some(dir), _) => DocumentOutput::SaveTo(dir),
                (None, true) => DocumentOutput::DataUrl,
                (None, false) => DocumentOutput::Describe,
            };
            fine_controller::document(state, id, output)
        }
    }
}
