use clap::{Parser, Subcommand, ValueEnum};
use coursebay::console::commands::{CallableTrait, IssueTokenCommand, MigrateCommand};
use coursebay::models::Role;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Debug, Subcommand)]
enum TokenCommands {
    /// Print a signed session cookie for a user, seller or admin
    Issue {
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long)]
        id: i32,
        #[arg(long)]
        email: String,
        /// defaults to auth.token_ttl_hours
        #[arg(long)]
        ttl_hours: Option<i64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Seller,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Role::User,
            RoleArg::Seller => Role::Seller,
            RoleArg::Admin => Role::Admin,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    get_command(cli).call()
}

fn get_command(cli: Cli) -> Box<dyn CallableTrait> {
    match cli.command {
        Commands::Migrate => Box::new(MigrateCommand::new()),
        Commands::Token { command } => match command {
            TokenCommands::Issue {
                role,
                id,
                email,
                ttl_hours,
            } => Box::new(IssueTokenCommand::new(id, email, role.into(), ttl_hours)),
        },
    }
}
