//! xcurve CLI - Curve25519 key agreement and XEdDSA signing.

mod commands;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xcurve_core::{Config, Curve, ProviderVariant};

#[derive(Parser)]
#[command(name = "xcurve")]
#[command(about = "Curve25519 key agreement and XEdDSA signing", long_about = None)]
struct Cli {
    /// Provider variant: current or deprecated
    #[arg(short, long, global = true, default_value_t = ProviderVariant::Current)]
    variant: ProviderVariant,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair
    Keygen,
    /// Derive the key pair for an existing private key
    Derive {
        /// Private key (base64)
        #[arg(long)]
        private: Option<String>,
    },
    /// Compute a shared secret
    Agree {
        /// Peer public key, 32 or 33 bytes (base64)
        #[arg(long)]
        public: String,
        /// Our private key (base64)
        #[arg(long)]
        private: Option<String>,
    },
    /// Sign a message
    Sign {
        /// Private key (base64)
        #[arg(long)]
        private: Option<String>,
        #[command(flatten)]
        message: MessageArgs,
    },
    /// Verify a signature
    Verify {
        /// Signer public key, 32 or 33 bytes (base64)
        #[arg(long)]
        public: String,
        #[command(flatten)]
        message: MessageArgs,
        /// Signature (base64)
        #[arg(long)]
        signature: Option<String>,
        /// Skip verification entirely. Only for a key you generated yourself.
        #[arg(long)]
        initiator_shortcut: bool,
    },
}

#[derive(Args)]
#[group(multiple = false)]
struct MessageArgs {
    /// Message bytes (base64)
    #[arg(long)]
    message: Option<String>,
    /// Message as UTF-8 text
    #[arg(long)]
    text: Option<String>,
}

impl MessageArgs {
    fn bytes(&self) -> anyhow::Result<Option<Vec<u8>>> {
        if let Some(text) = &self.text {
            return Ok(Some(text.as_bytes().to_vec()));
        }
        self.message
            .as_deref()
            .map(xcurve_core::encoding::decode_bytes)
            .transpose()
            .map_err(Into::into)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("xcurve=info".parse()?)
                .add_directive("xcurve_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let curve = Curve::new(&Config {
        variant: cli.variant,
    });

    match cli.command {
        Commands::Keygen => commands::keygen(&curve)?,
        Commands::Derive { private } => commands::derive(&curve, private.as_deref())?,
        Commands::Agree { public, private } => {
            commands::agree(&curve, &public, private.as_deref())?
        }
        Commands::Sign { private, message } => {
            let message = message.bytes()?.unwrap_or_default();
            commands::sign(&curve, private.as_deref(), &message)?
        }
        Commands::Verify {
            public,
            message,
            signature,
            initiator_shortcut,
        } => {
            let message = message.bytes()?;
            commands::verify(
                &curve,
                &public,
                message.as_deref(),
                signature.as_deref(),
                initiator_shortcut,
            )?
        }
    }

    Ok(())
}
