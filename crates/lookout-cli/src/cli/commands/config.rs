//! `lookout config` - settings file location.

use anyhow::Result;
use std::path::Path;

use crate::cli::args::{ConfigArgs, ConfigCommands};

pub fn execute(path: &Path, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
