use std::{collections::HashSet, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    cell::StateCell,
    config::{Cfg, CoreConfig},
    edit::{self, Edit, Field},
    model::{Direction, TableState, Team, TeamId},
    ranking::{self, Scoring, Standing},
    session::Session,
    snapshot::RosterSnapshot,
    storage::{FileStorage, StorageHandle},
};

/// Name given to a freshly added team
pub const DEFAULT_TEAM_NAME: &str = "Novo Participante";

/// Central access point for the league table.
///
/// Holds the persisted [`TableState`] and the configuration. Reads are open to everyone; every
/// change takes the caller's [`Session`] and is refused unless it is authorized. That check only
/// decides what a consumer may offer; the store behind it is not protected.
#[derive(Debug, Clone)]
pub struct League {
    cell: StateCell<TableState>,
    cfg: Cfg,
}

impl League {
    /// Opens the league stored in the standings state directory using the on-disk configuration.
    pub fn open() -> Result<Self> {
        let storage = FileStorage::open_default()?;
        Ok(Self::with_storage(
            Arc::new(storage),
            CoreConfig::load().into_handle(),
        ))
    }

    /// Opens the league kept in `storage` under the configured key.
    pub fn with_storage(storage: StorageHandle, cfg: Cfg) -> Self {
        let key = cfg.read().storage_key().clone();
        Self {
            cell: StateCell::create(key, TableState::default_snapshot(), storage),
            cfg,
        }
    }

    pub fn cfg(&self) -> &Cfg {
        &self.cfg
    }

    pub fn scoring(&self) -> Scoring {
        self.cfg.read().scoring()
    }

    /// Whether the stored table has been loaded. Until then [`League::state`] is the default.
    pub fn is_hydrated(&self) -> bool {
        self.cell.is_hydrated()
    }

    pub async fn hydrated(&self) {
        self.cell.hydrated().await;
    }

    pub fn state(&self) -> TableState {
        self.cell.get()
    }

    /// The table in display order with derived points and goal difference.
    pub fn standings(&self) -> Vec<Standing> {
        let scoring = self.scoring();
        self.cell.with(|state| ranking::standings(state, scoring))
    }

    /// Appends a new team with zeroed statistics and returns its id.
    pub fn add_team(&self, session: &Session, name: Option<&str>) -> Result<TeamId> {
        authorize(session)?;

        let name = match name.map(str::trim) {
            Some("") => return Err(edit::Error::Blank { field: Field::Name }.into()),
            Some(name) => name,
            None => DEFAULT_TEAM_NAME,
        };

        // Generated under the write lock so concurrent adds never share an id
        let mut id = TeamId::from("");
        self.cell.update(|prev| {
            id = TeamId::generate(&prev.entities);
            prev.with_team_added(Team::new(id.clone(), name))
        });
        info!("Added team {name} ({id})");

        Ok(id)
    }

    pub fn remove_team(&self, session: &Session, id: &TeamId) -> Result<()> {
        authorize(session)?;

        self.cell.try_update(|prev| {
            if prev.contains(id) {
                Ok(prev.with_team_removed(id))
            } else {
                Err(edit::Error::UnknownTeam(id.clone()))
            }
        })?;
        info!("Removed team {id}");

        Ok(())
    }

    /// Validates `raw` for `field` and applies it to the team `id`.
    ///
    /// Invalid input is refused and the table is left as it was.
    pub fn edit_team(&self, session: &Session, id: &TeamId, field: Field, raw: &str) -> Result<()> {
        authorize(session)?;

        let edit = Edit::parse(field, raw)?;
        self.apply(id, &edit)?;
        debug!("Set {field} of {id}");

        Ok(())
    }

    pub fn set_photo(&self, session: &Session, id: &TeamId, photo: Option<String>) -> Result<()> {
        authorize(session)?;

        self.apply(id, &Edit::Photo(photo))
    }

    pub fn move_team(&self, session: &Session, id: &TeamId, direction: Direction) -> Result<()> {
        authorize(session)?;

        self.cell.try_update(|prev| {
            if prev.contains(id) {
                Ok(prev.with_team_moved(id, direction))
            } else {
                Err(edit::Error::UnknownTeam(id.clone()))
            }
        })?;

        Ok(())
    }

    pub fn set_title(&self, session: &Session, title: &str) -> Result<()> {
        authorize(session)?;

        self.cell.update(|prev| prev.with_title(title));

        Ok(())
    }

    pub fn set_subtitle(&self, session: &Session, subtitle: &str) -> Result<()> {
        authorize(session)?;

        self.cell.update(|prev| prev.with_subtitle(subtitle));

        Ok(())
    }

    pub fn set_auto_sort(&self, session: &Session, auto_sort: bool) -> Result<()> {
        authorize(session)?;

        self.cell.update(|prev| prev.with_auto_sort(auto_sort));

        Ok(())
    }

    /// Flips between automatic and manual order and returns the new setting.
    pub fn toggle_auto_sort(&self, session: &Session) -> Result<bool> {
        authorize(session)?;

        let mut auto_sort = false;
        self.cell.update(|prev| {
            auto_sort = !prev.auto_sort;
            prev.with_auto_sort(auto_sort)
        });

        Ok(auto_sort)
    }

    /// Replaces the whole table with the built-in default.
    pub fn reset(&self, session: &Session) -> Result<()> {
        authorize(session)?;

        self.cell.set(TableState::default_snapshot());
        info!("Table reset to defaults");

        Ok(())
    }

    /// Writes the current roster to `snapshot` and returns how many teams were written.
    pub fn export_roster(&self, snapshot: &RosterSnapshot) -> Result<usize> {
        let teams = self.cell.with(|state| state.entities.clone());
        snapshot.replace(&teams)?;

        Ok(teams.len())
    }

    /// Replaces the roster with the one in `snapshot`, keeping title and sort mode.
    ///
    /// Teams whose id already appeared earlier in the snapshot are skipped.
    pub fn import_roster(&self, session: &Session, snapshot: &RosterSnapshot) -> Result<usize> {
        authorize(session)?;

        let mut seen = HashSet::new();
        let teams: Vec<Team> = snapshot
            .read()?
            .into_iter()
            .filter(|team| {
                let fresh = seen.insert(team.id.clone());
                if !fresh {
                    warn!("Skipping duplicate team id {} in roster", team.id);
                }
                fresh
            })
            .collect();
        let count = teams.len();

        self.cell.update(|prev| TableState {
            entities: teams,
            ..prev.clone()
        });
        info!("Imported {count} teams from {}", snapshot.path().display());

        Ok(count)
    }

    /// Return a mock [`League`] backed by in-memory storage and configuration.
    #[cfg(test)]
    pub(crate) fn mock() -> (Self, Arc<crate::storage::MemoryStorage>) {
        let storage = Arc::new(crate::storage::MemoryStorage::new());
        let league = Self::with_storage(storage.clone(), CoreConfig::mock().into_handle());
        (league, storage)
    }

    fn apply(&self, id: &TeamId, edit: &Edit) -> Result<()> {
        self.cell.try_update(|prev| prev.with_edit(id, edit))?;

        Ok(())
    }
}

fn authorize(session: &Session) -> Result<()> {
    if session.is_authorized() {
        Ok(())
    } else {
        Err(Error::NotAuthorized)
    }
}
