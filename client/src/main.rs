use anyhow::Result;
use clap::{Parser, Subcommand};
use roster_client::{AuthContext, SessionStore};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Command line client for the Roster account service")]
#[command(version)]
struct Cli {
    #[arg(long, default_value = "http://localhost:7080")]
    api_url: String,

    /// Override the session file path (defaults to ROSTER_SESSION_FILE
    /// or roster_session.json).
    #[arg(long)]
    session_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session locally
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// List the most recently created users
    List,
    /// Show a user by id
    Show { id: String },
    /// Update a user's profile fields
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete a user by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = match cli.session_file {
        Some(path) => SessionStore::new(path),
        None => SessionStore::from_env(),
    };
    let context = AuthContext::new(cli.api_url, store);

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            let user = context.register(&name, &email, &password).await?;
            println!("Registered {} <{}> (id {})", user.name, user.email, user.id);
        }
        Commands::Login { email, password } => {
            let user = context.login(&email, &password).await?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }
        Commands::Logout => {
            let message = context.logout().await?;
            println!("{message}");
        }
        Commands::Whoami => match context.current_user() {
            Some(local) => match context.whoami().await {
                Ok(user) => println!("{} <{}> (id {})", user.name, user.email, user.id),
                Err(error) => {
                    println!(
                        "{} <{}> (id {}) [stored session; server check failed: {error}]",
                        local.name, local.email, local.id
                    );
                }
            },
            None => println!("Not logged in."),
        },
        Commands::List => {
            let users = context.list_users().await?;
            if users.is_empty() {
                println!("No users.");
            }
            for user in users {
                println!("{}  {} <{}>", user.id, user.name, user.email);
            }
        }
        Commands::Show { id } => {
            let user = context.get_user(&id).await?;
            println!("id:         {}", user.id);
            println!("name:       {}", user.name);
            println!("email:      {}", user.email);
            println!("created at: {}", user.created_at);
            println!("updated at: {}", user.updated_at);
        }
        Commands::Update {
            id,
            name,
            email,
            password,
        } => {
            let user = context
                .update_user(&id, name.as_deref(), email.as_deref(), password.as_deref())
                .await?;
            println!("Updated {} <{}>", user.name, user.email);
        }
        Commands::Delete { id } => {
            let message = context.delete_user(&id).await?;
            println!("{message}");
        }
    }

    Ok(())
}
