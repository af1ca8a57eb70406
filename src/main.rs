//! Parley CLI binary

use clap::Parser;
use parley::cli::{Cli, Commands, ParleyApp};
use parley::types::PlayerId;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { session } => {
            let app = ParleyApp::load(&session)?;
            app.print_summary();
        }

        Commands::Validate { session, offer } => {
            let app = ParleyApp::load(&session)?;
            let offer = app.load_offer(&offer)?;
            app.print_items(&offer);
            match app.validate_offer(&offer) {
                Ok(()) => tracing::info!("Offer {} is ready to accept", offer.id()),
                Err(e) => tracing::warn!("Offer {} cannot be accepted: {}", offer.id(), e),
            }
        }

        Commands::Apply {
            session,
            offer,
            output,
        } => {
            let mut app = ParleyApp::load(&session)?;
            let offer = app.load_offer(&offer)?;
            let id = offer.id().clone();
            app.apply_offer(offer)?;

            let target = output.unwrap_or(session);
            app.save(&target)?;
            tracing::info!("Offer {} applied; session written to {}", id, target.display());
        }

        Commands::Stance {
            session,
            first,
            second,
        } => {
            let app = ParleyApp::load(&session)?;
            let first = PlayerId::new(first);
            let second = PlayerId::new(second);
            match app.session().stance_between(&first, &second) {
                Some(stance) => println!("{} / {}: {}", first, second, stance),
                None => println!("{} / {}: no recorded stance", first, second),
            }
        }
    }

    Ok(())
}
