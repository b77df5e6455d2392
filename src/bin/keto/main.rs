//! `keto` - check and expand relation tuples on a remote Keto server.

mod output;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use keto_client::config::{
    Mode, ProcessEnvironment, RemoteFlags, DEFAULT_READ_REMOTE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WRITE_REMOTE, FLAG_CLIENT_TIMEOUT, FLAG_CLIENT_TYPE, FLAG_READ_REMOTE,
    FLAG_WRITE_REMOTE,
};
use keto_client::{Client, ClientType, ErrorKind};
use tracing_subscriber::EnvFilter;

use output::Format;

#[derive(Parser)]
#[command(name = "keto")]
#[command(about = "Query a Keto server over gRPC or REST", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    remote: RemoteArgs,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Default)]
    format: Format,

    /// Suppress hints on empty results
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Connection flags. Each is overridden by its `KETO_*` environment variable.
#[derive(Args)]
struct RemoteArgs {
    /// Remote address of the read API endpoint [env: KETO_READ_REMOTE]
    #[arg(long = FLAG_READ_REMOTE, global = true, default_value = DEFAULT_READ_REMOTE)]
    read_remote: String,

    /// Remote address of the write API endpoint [env: KETO_WRITE_REMOTE]
    #[arg(long = FLAG_WRITE_REMOTE, global = true, default_value = DEFAULT_WRITE_REMOTE)]
    write_remote: String,

    /// Client library to use: grpc, rest [env: KETO_CLIENT_TYPE]
    #[arg(
        long = FLAG_CLIENT_TYPE,
        global = true,
        default_value_t = ClientType::default().to_string()
    )]
    client_type: String,

    /// Client timeout in seconds [env: KETO_CLIENT_TIMEOUT]
    #[arg(
        long = FLAG_CLIENT_TIMEOUT,
        global = true,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        allow_negative_numbers = true
    )]
    client_timeout: i64,
}

impl From<RemoteArgs> for RemoteFlags {
    fn from(args: RemoteArgs) -> Self {
        RemoteFlags::builder()
            .read_remote(args.read_remote)
            .write_remote(args.write_remote)
            .client_type(args.client_type)
            .timeout_secs(args.client_timeout)
            .build()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a subject has a relation on an object
    ///
    /// Resolves subject sets and subject set rewrites.
    Check {
        /// Subject ID
        subject: String,
        /// Relation
        relation: String,
        /// Namespace of the object
        namespace: String,
        /// Object ID
        object: String,

        /// Maximum depth of the search tree. Values below 1 or above the
        /// server's limit use the server's limit.
        #[arg(short = 'd', long, default_value_t = 0, allow_negative_numbers = true)]
        max_depth: i32,
    },

    /// Expand a subject set into a tree of subjects
    Expand {
        /// Relation
        relation: String,
        /// Namespace of the object
        namespace: String,
        /// Object ID
        object: String,

        /// Maximum depth of the returned tree. Values below 1 or above the
        /// server's limit use the server's limit.
        #[arg(short = 'd', long, default_value_t = 0, allow_negative_numbers = true)]
        max_depth: i32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.kind() {
                ErrorKind::Request | ErrorKind::Conversion => {
                    eprintln!("Could not make request: {e}")
                }
                _ => eprintln!("Error: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> keto_client::Result<String> {
    let flags = RemoteFlags::from(cli.remote);
    // Check and expand only read
    let client = Client::from_flags(&flags, &ProcessEnvironment, Mode::ReadOnly).await?;

    let out = match cli.command {
        Commands::Check {
            subject,
            relation,
            namespace,
            object,
            max_depth,
        } => {
            let allowed = client
                .check(&subject, &relation, &namespace, &object, max_depth)
                .await?;
            output::render_check(allowed, cli.format)?
        }
        Commands::Expand {
            relation,
            namespace,
            object,
            max_depth,
        } => {
            let tree = client
                .expand(&relation, &namespace, &object, max_depth)
                .await?;
            output::render_expand(tree.as_ref(), cli.format, cli.quiet)?
        }
    };

    client.close();
    Ok(out)
}
