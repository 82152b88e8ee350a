pub mod edit;
pub mod init;
pub mod show;

pub use edit::{
    add, delete, move_node, rename, set, set_published, AddArgs, DeleteArgs, MoveArgs, PageArgs,
    RenameArgs, SetArgs,
};
pub use init::{init, InitArgs};
pub use show::{show, view};

use crate::config::Config;
use anyhow::Result;
use clap::Args;
use pagesmith_editor::Placement;
use pagesmith_workspace::{DocumentStore, JsonFileStore, PageSync, PublicPageView};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a command needs: config plus the store it points at
pub struct Context {
    pub cwd: PathBuf,
    pub config: Config,
    store: Arc<dyn DocumentStore>,
}

impl Context {
    pub fn load(cwd: &Path) -> Result<Self> {
        let config = Config::load(cwd)?;
        let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::new(config.get_data_dir(cwd)));

        Ok(Self {
            cwd: cwd.to_path_buf(),
            config,
            store,
        })
    }

    pub fn sync(&self) -> PageSync {
        PageSync::new(self.store.clone())
    }

    pub fn public_view(&self) -> PublicPageView {
        PublicPageView::new(self.store.clone())
    }
}

/// Where to put a new or moved component
#[derive(Args, Debug, Default)]
pub struct PlacementArgs {
    /// Container node id (Section or Columns); omit for the page top level
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Column index inside a Columns parent
    #[arg(short, long)]
    pub column: Option<usize>,

    /// Insert before this sibling
    #[arg(long, conflicts_with = "after")]
    pub before: Option<String>,

    /// Insert after this sibling
    #[arg(long)]
    pub after: Option<String>,
}

impl PlacementArgs {
    pub fn to_placement(&self) -> Placement {
        let placement = Placement {
            parent_id: self.parent.clone(),
            column_index: self.column,
            ..Placement::default()
        };

        match (&self.before, &self.after) {
            (Some(target), _) => placement.before(target),
            (None, Some(target)) => placement.after(target),
            (None, None) => placement,
        }
    }
}
