//! Stowage storage payment planner.

fn main() -> eyre::Result<()> {
    stowage_cli::run()
}
