//! `lookout theme` - theme preference.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ThemeArgs, ThemeCommands};
use crate::output::print_structured;

pub async fn execute(ctx: &Context, args: ThemeArgs) -> Result<()> {
    let registry = ctx.engine.registry();
    let theme = match args.command {
        ThemeCommands::Get => registry.theme().await?,
        ThemeCommands::Set { theme } => {
            registry.set_theme(theme).await?;
            theme
        }
    };

    if !print_structured(ctx.output_format, &theme)? {
        println!("{} {}", "Theme:".bold(), theme.to_string().cyan());
    }
    Ok(())
}
