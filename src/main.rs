use anyhow::{Context, Result};
use tracing::info;

use rookery_core::{Position, STARTING_FEN};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let record = std::env::args()
        .nth(1)
        .unwrap_or_else(|| STARTING_FEN.to_string());
    let position: Position = record
        .parse()
        .with_context(|| format!("cannot parse position record \"{record}\""))?;
    info!(side = %position.side_to_move(), "position loaded");

    println!("{}", position.diagram());
    println!();
    println!("{position}");
    Ok(())
}
