//! Controlador de importación
//!
//! Lee los archivos indicados y los pasa al servicio de importación. Un
//! archivo ilegible cuenta como extracción fallida, igual que un error del
//! extractor.

use tracing::warn;

use crate::services::{RecordKind, SourceDocument};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub async fn import(state: &AppState, kind: RecordKind, paths: &[String]) -> AppResult<String> {
    state.sessions().require_session()?;
    let importer = state.importer()?;

    let mut documents = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();
    for path in paths {
        match SourceDocument::from_path(path) {
            Ok(document) => documents.push(document),
            Err(e) => {
                warn!("⚠️ No se pudo leer {}: {}", path, e);
                unreadable.push(path.clone());
            }
        }
    }

    let mut summary = importer.import(kind, &documents).await?;
    summary.files += unreadable.len();
    summary.failed_files.extend(unreadable);
    Ok(summary.message())
}
