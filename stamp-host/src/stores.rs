//! Per-category id stores and startup registration.
//!
//! One store per host object category. The three impls are intentionally
//! uniform: check the attachment slot, attach a fresh id if absent, persist.
//! A persist failure is logged at error level and swallowed — the in-memory
//! assignment stands and `make` never fails for persistence reasons.

use std::any::TypeId;

use stamp_core::{Attachments, HostObject, Id, IdRegistry, IdStore, ID_KEY};

use crate::objects::{Folder, Project, Run};

/// Registry with the standard stores registered, in a fixed order.
///
/// The host's stand-in for extension discovery: call once at startup and
/// share the result (typically behind an `Arc`).
pub fn default_registry() -> IdRegistry {
    IdRegistry::with_stores(vec![
        Box::new(ProjectIdStore),
        Box::new(RunIdStore),
        Box::new(FolderIdStore),
    ])
}

/// Stores ids for [`Project`]s in the project's attachment slot.
pub struct ProjectIdStore;

impl IdStore for ProjectIdStore {
    fn supports(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<Project>()
    }

    fn make(&self, object: &mut dyn HostObject) {
        let Some(project) = object.as_any_mut().downcast_mut::<Project>() else {
            return;
        };
        if project.attachment(ID_KEY).is_some() {
            return;
        }
        project.set_attachment(ID_KEY, Id::random().to_string());
        if let Err(err) = project.persist() {
            tracing::error!(project = %project.name, error = %err, "failed to save id");
        }
    }

    fn get(&self, object: &dyn HostObject) -> Option<Id> {
        let project = object.as_any().downcast_ref::<Project>()?;
        project.attachment(ID_KEY).map(Id::from_persisted)
    }
}

/// Stores ids for [`Run`]s in the run's attachment slot.
pub struct RunIdStore;

impl IdStore for RunIdStore {
    fn supports(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<Run>()
    }

    fn make(&self, object: &mut dyn HostObject) {
        let Some(run) = object.as_any_mut().downcast_mut::<Run>() else {
            return;
        };
        if run.attachment(ID_KEY).is_some() {
            return;
        }
        run.set_attachment(ID_KEY, Id::random().to_string());
        if let Err(err) = run.persist() {
            tracing::error!(
                project = %run.project,
                run = %run.number,
                error = %err,
                "failed to save id"
            );
        }
    }

    fn get(&self, object: &dyn HostObject) -> Option<Id> {
        let run = object.as_any().downcast_ref::<Run>()?;
        run.attachment(ID_KEY).map(Id::from_persisted)
    }
}

/// Stores ids for [`Folder`]s in the folder's attachment slot.
pub struct FolderIdStore;

impl IdStore for FolderIdStore {
    fn supports(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<Folder>()
    }

    fn make(&self, object: &mut dyn HostObject) {
        let Some(folder) = object.as_any_mut().downcast_mut::<Folder>() else {
            return;
        };
        if folder.attachment(ID_KEY).is_some() {
            return;
        }
        folder.set_attachment(ID_KEY, Id::random().to_string());
        if let Err(err) = folder.persist() {
            tracing::error!(folder = %folder.name, error = %err, "failed to save id");
        }
    }

    fn get(&self, object: &dyn HostObject) -> Option<Id> {
        let folder = object.as_any().downcast_ref::<Folder>()?;
        folder.attachment(ID_KEY).map(Id::from_persisted)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use stamp_core::ID_LEN;
    use tempfile::TempDir;

    fn make_root() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn make_assigns_once() {
        let root = make_root();
        let mut project = Project::create(root.path(), "ingest").expect("create");
        let store = ProjectIdStore;

        assert_eq!(store.get(&project), None);
        store.make(&mut project);
        let id = store.get(&project).expect("id");
        assert_eq!(id.as_str().len(), ID_LEN);

        store.make(&mut project);
        assert_eq!(store.get(&project), Some(id));
    }

    #[test]
    fn stores_only_claim_their_own_category() {
        assert!(ProjectIdStore.supports(TypeId::of::<Project>()));
        assert!(!ProjectIdStore.supports(TypeId::of::<Run>()));
        assert!(!ProjectIdStore.supports(TypeId::of::<Folder>()));
        assert!(RunIdStore.supports(TypeId::of::<Run>()));
        assert!(FolderIdStore.supports(TypeId::of::<Folder>()));
    }

    #[test]
    fn get_on_foreign_category_is_none() {
        let root = make_root();
        let folder = Folder::create(root.path(), "team-a").expect("create");
        assert_eq!(ProjectIdStore.get(&folder), None);
    }

    #[cfg(unix)]
    #[test]
    fn persist_failure_is_swallowed_and_id_stands() {
        use std::os::unix::fs::PermissionsExt;

        let root = make_root();
        let mut project = Project::create(root.path(), "ingest").expect("create");

        // Make the project directory read-only so the save inside `make` fails.
        let dir = crate::objects::project_path(root.path(), &project.name)
            .parent()
            .expect("parent")
            .to_owned();
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o500)).expect("chmod");

        let store = ProjectIdStore;
        store.make(&mut project); // must not panic or propagate
        let id = store.get(&project).expect("in-memory id");
        assert_eq!(id.as_str().len(), ID_LEN);

        // Restore so TempDir can clean up.
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700)).expect("chmod back");

        // Assignment was never persisted: a reload has no id.
        let reloaded = Project::load(root.path(), &project.name).expect("load");
        assert_eq!(store.get(&reloaded), None);
    }
}
