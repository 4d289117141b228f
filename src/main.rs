use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use hotdesk::catalog::SpaceCatalog;
use hotdesk::error::BookingError;
use hotdesk::ledger::BookingLedger;
use hotdesk::menu::Session;

/// The three sample spaces every fresh install starts with; the office
/// begins administratively disabled.
fn seed(catalog: &mut SpaceCatalog) -> Result<(), BookingError> {
    catalog.add("Open Desk", 10.0)?;
    let office = catalog.add("Private Office", 25.0)?.id;
    catalog.set_available(office, false)?;
    catalog.add("Meeting Room", 40.0)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Menus own stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let seed_spaces = std::env::var("HOTDESK_SEED")
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off"))
        .unwrap_or(true);

    let mut catalog = SpaceCatalog::new();
    if seed_spaces {
        seed(&mut catalog)?;
        info!("seeded {} sample spaces", catalog.list().len());
    }

    let mut session = Session::new(
        io::stdin().lock(),
        io::stdout().lock(),
        catalog,
        BookingLedger::new(),
    );
    session.run()?;
    Ok(())
}
