use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn list(state: &AppState) -> AppResult<String> {
    state.sessions().require_session()?;
    let codes = state.codes().list_codes()?;
    if codes.is_empty() {
        return Ok("The catalog is empty. Import a Detran table first.".to_string());
    }

    let mut out = format!("{:<8}  {:>10}  {:>6}  {}\n", "CODE", "VALUE", "POINTS", "DESCRIPTION");
    for code in codes {
        out.push_str(&format!(
            "{:<8}  {:>10}  {:>6}  {}\n",
            code.code,
            format!("{:.2}", code.default_value.round_dp(2)),
            code.default_points,
            code.description
        ));
    }
    Ok(out)
}

pub fn show(state: &AppState, code: &str) -> AppResult<String> {
    state.sessions().require_session()?;
    Ok(match state.codes().find_infraction_code(code)? {
        Some(found) => format!(
            "{}: {}\nValue: R$ {:.2}\nPoints: {}",
            found.code,
            found.description,
            found.default_value.round_dp(2),
            found.default_points
        ),
        None => format!("Code {} is not in the catalog.", code),
    })
}
