use std::sync::Arc;

use crate::config::Config;
use crate::draft::DraftStore;
use crate::export::RenderClient;
use crate::models::resume::{Certificate, Internship, Project, Skill};
use crate::sync::{Collection, Profile};

/// Handles to the remote career-portal store: the profile plus one
/// collection per entity kind. Trait objects so tests can swap in fakes
/// without touching the handlers or the session layer.
#[derive(Clone)]
pub struct RemoteStore {
    pub profile: Arc<dyn Profile>,
    pub projects: Arc<dyn Collection<Project>>,
    pub internships: Arc<dyn Collection<Internship>>,
    pub skills: Arc<dyn Collection<Skill>>,
    pub certificates: Arc<dyn Collection<Certificate>>,
}

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub drafts: DraftStore,
    pub remote: RemoteStore,
    /// Document-compile collaborator for the export surface.
    pub compiler: RenderClient,
    pub config: Config,
}
