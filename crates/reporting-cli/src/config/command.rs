//! Subcommands and their arguments.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Show applied and pending database migrations.
    MigrationStatus,
    /// Upload a report definition, updating a same-named template in place.
    Save(UploadArgs),
    /// Upload a report definition as a new template; fails if the name is taken.
    Insert(UploadArgs),
    /// Upload a report definition, replacing a same-named template.
    Replace(UploadArgs),
    /// Print a stored template.
    Show(NameArgs),
    /// List stored templates.
    List(ListArgs),
    /// Delete a stored template.
    Delete(NameArgs),
    /// Resolve request parameters against a stored template.
    MapParams(MapParamsArgs),
}

/// Arguments of the upload commands.
#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    /// Report definition file (.jrxml)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Template name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Template description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Right required to access the template (repeatable)
    #[arg(long = "right", short = 'r')]
    pub rights: Vec<String>,

    /// Template type, used by insert and replace when the file declares none
    #[arg(long = "type", short = 't')]
    pub template_type: Option<String>,
}

/// Arguments of commands addressing one template.
#[derive(Debug, Clone, Args)]
pub struct NameArgs {
    /// Template name
    #[arg(long, short = 'n')]
    pub name: String,
}

/// Arguments of the list command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// 1-based page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Templates per page
    #[arg(long, default_value = "50")]
    pub page_size: i64,
}

/// Arguments of the map-params command.
#[derive(Debug, Clone, Args)]
pub struct MapParamsArgs {
    /// Template name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Request parameters as key=value pairs; a key may repeat
    #[arg(value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

impl MapParamsArgs {
    /// Groups the pairs into a multi-valued request map, keeping order per key.
    pub fn request(&self) -> HashMap<String, Vec<String>> {
        let mut request: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in &self.params {
            request.entry(key.clone()).or_default().push(value.clone());
        }
        request
    }
}

fn parse_key_value(pair: &str) -> Result<(String, String), String> {
    pair.split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected key=value, got '{pair}'"))
}
