//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Tienda API - store back office service
#[derive(Parser, Debug)]
#[command(name = "tienda-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Insert the sample orders
    Seed(SeedArgs),
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "SERVER_PORT")]
    pub port: u16,
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Log and skip orders whose id is already taken instead of failing
    #[arg(long)]
    pub skip_existing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        let cli = Cli::parse_from(["tienda-api", "seed", "--skip-existing"]);
        assert!(matches!(
            cli.command,
            Commands::Seed(SeedArgs { skip_existing: true })
        ));

        let cli = Cli::parse_from(["tienda-api", "-v", "seed"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Seed(SeedArgs { skip_existing: false })
        ));
    }

    #[test]
    fn test_parse_migrate() {
        let cli = Cli::parse_from(["tienda-api", "migrate", "status"]);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }
}
