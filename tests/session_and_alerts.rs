mod common;

use chrono::NaiveDate;

use fleet_compliance::controllers::{driver_controller, fine_controller};
use fleet_compliance::models::{CreateDriverRequest, CreateFineRequest, RegisterUserRequest};
use fleet_compliance::services::LicenseStatus;
use fleet_compliance::utils::errors::AppError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add_driver(state: &fleet_compliance::state::AppState, name: &str, cpf: &str, validity: &str) {
    state
        .drivers()
        .register_driver(CreateDriverRequest {
            name: name.to_string(),
            cpf: cpf.to_string(),
            license_number: String::new(),
            validity_date: validity.to_string(),
        })
        .unwrap();
}

#[test]
fn test_session_cycle() {
    let state = common::state_with(None);
    let sessions = state.sessions();
    let user = sessions
        .register(RegisterUserRequest {
            username: "gestor".to_string(),
            password: "frota123".to_string(),
            name: "Gestor".to_string(),
        })
        .unwrap();

    assert_eq!(sessions.current_user().unwrap(), None);
    assert_eq!(sessions.login("gestor", "frota123").unwrap(), user);
    assert_eq!(sessions.current_user().unwrap(), Some(user));

    sessions.logout().unwrap();
    assert_eq!(sessions.current_user().unwrap(), None);
}

#[test]
fn test_record_commands_require_a_session() {
    let state = common::state_with(None);
    let err = driver_controller::list(&state).unwrap_err();
    assert!(matches!(err, AppError::AuthFailure));
}

#[test]
fn test_alert_boundaries() {
    let state = common::logged_in_state(None);
    add_driver(&state, "Limite", "1", "2024-01-31");
    add_driver(&state, "Fora", "2", "2024-02-01");
    add_driver(&state, "Vencida", "3", "2023-12-31");
    add_driver(&state, "Sem data", "4", "");

    let compliance = state.compliance();
    let alerts: Vec<String> = compliance
        .alerts(date(2024, 1, 1))
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(alerts, vec!["Limite", "Vencida"]);

    let report = compliance.license_report(date(2024, 1, 1)).unwrap();
    let statuses: Vec<LicenseStatus> = report.into_iter().map(|(_, s)| s).collect();
    assert_eq!(
        statuses,
        vec![
            LicenseStatus::ExpiringIn(30),
            LicenseStatus::Regular,
            LicenseStatus::Expired,
            LicenseStatus::NotInformed,
        ]
    );
}

#[test]
fn test_alerts_reflect_edits_immediately() {
    let state = common::logged_in_state(None);
    add_driver(&state, "Ana", "1", "2030-01-01");
    let as_of = date(2029, 1, 1);
    assert!(state.compliance().alerts(as_of).unwrap().is_empty());

    let drivers = state.drivers();
    let mut ana = drivers.list_drivers().unwrap().remove(0);
    ana.validity_date = Some(date(2029, 1, 15));
    assert!(drivers.update_driver(ana).unwrap());
    assert_eq!(state.compliance().alerts(as_of).unwrap().len(), 1);

    let output = driver_controller::alerts(&state, Some("2029-01-01")).unwrap();
    assert!(output.contains("Ana"));
    assert!(output.contains("expires in 14 days"));
}

#[test]
fn test_fine_for_expired_license_warns() {
    let state = common::logged_in_state(None);
    add_driver(&state, "Carlos", "9", "2001-05-10");

    let output = fine_controller::add(
        &state,
        CreateFineRequest {
            ticket_number: "AI-9".to_string(),
            plate: "ABC1D23".to_string(),
            code: "5010".to_string(),
            driver: Some(fleet_compliance::models::DriverRef::Name("Carlos".to_string())),
            ..Default::default()
        },
    )
    .unwrap();

    assert!(output.contains("Warning: Carlos's CNH is expired."));
    assert_eq!(state.fines().list_fines().unwrap().len(), 1);
}

#[test]
fn test_driver_list_counts_licenses_needing_attention() {
    let state = common::logged_in_state(None);
    add_driver(&state, "Vencida", "1", "2020-01-01");
    add_driver(&state, "Regular", "2", "2099-01-01");
    add_driver(&state, "Sem data", "3", "");

    let output = driver_controller::list(&state).unwrap();
    assert!(output.contains("Expired"));
    assert!(output.contains("Not Informed"));
    assert!(output.ends_with("1 driver(s) need attention; run `alerts` for details.\n"));
}
